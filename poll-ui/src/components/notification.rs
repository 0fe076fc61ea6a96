use leptos::*;
use poll_core::notice::Toast;

#[component]
pub fn Notification(#[prop(into)] toast: Signal<Option<Toast>>, on_close: Callback<()>) -> impl IntoView {
    move || {
        toast.get().map(|t| {
            let class = format!("toast {}", t.notice.kind.css_class());
            view! {
              <div class=class role="status">
                <span>{t.notice.message}</span>
                <button class="close" on:click=move |_| on_close.call(())>"×"</button>
              </div>
            }
        })
    }
}

use crate::components::notification::Notification;
use crate::components::poll_form::PollForm;
use crate::components::poll_list::PollList;
use gloo_timers::callback::Timeout;
use leptos::*;
use poll_core::notice::{Notice, Shell, Tab, Toasts};
use poll_core::CreatePollResult;

const TOAST_MS: u32 = 4_000;

fn show(toasts: RwSignal<Toasts>, notice: Notice) {
    if let Some(seq) = toasts.try_update(|t| t.notify(notice)) {
        Timeout::new(TOAST_MS, move || toasts.update(|t| t.expire(seq))).forget();
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab active"
    } else {
        "tab"
    }
}

#[component]
pub fn App() -> impl IntoView {
    let shell = create_rw_signal(Shell::new());
    let toasts = create_rw_signal(Toasts::new());

    // Tab content is rebuilt only when these values change.
    let tab = create_memo(move |_| shell.with(|s| s.tab()));
    let refresh = create_memo(move |_| shell.with(|s| s.refresh_trigger()));

    let on_notice = Callback::new(move |notice: Notice| show(toasts, notice));

    let on_created = Callback::new(move |result: CreatePollResult| {
        if let Some(notice) = shell.try_update(|s| s.poll_created(&result)) {
            show(toasts, notice);
        }
    });

    let toast = Signal::derive(move || toasts.with(|t| t.current().cloned()));
    let active = move |t: Tab| tab.get() == t;

    view! {
      <div class="app">
        <header class="header">
          <h1>"DecentralPoll"</h1>
          <p class="meta">"Powered by Internet Computer"</p>
        </header>

        <main>
          <nav class="tabs">
            <button
              class=move || tab_class(active(Tab::Polls))
              on:click=move |_| shell.update(|s| s.select(Tab::Polls))
            >"View Polls"</button>
            <button
              class=move || tab_class(active(Tab::Create))
              on:click=move |_| shell.update(|s| s.select(Tab::Create))
            >"Create Poll"</button>
          </nav>

          <section class="content">
            {move || match tab.get() {
              Tab::Polls => view! { <PollList refresh=refresh on_notice=on_notice/> }.into_view(),
              Tab::Create => view! { <PollForm on_created=on_created/> }.into_view(),
            }}
          </section>
        </main>

        <Notification toast=toast on_close=Callback::new(move |_: ()| toasts.update(|t| t.dismiss()))/>
      </div>
    }
}

use crate::bridge;
use leptos::*;
use poll_core::form::{PollForm as FormState, SubmitStep};
use poll_core::CreatePollResult;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn PollForm(on_created: Callback<CreatePollResult>) -> impl IntoView {
    let client = bridge::use_client();
    let form = create_rw_signal(FormState::new());

    let submitting = move || form.with(|f| f.is_submitting());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match form.try_update(|f| f.begin_submit()) {
            Some(SubmitStep::Send(draft)) => {
                let client = client.get_value();
                spawn_local(async move {
                    let result: CreatePollResult =
                        client.create_poll(&draft.question, &draft.options).await.into();
                    form.update(|f| f.finish_submit(&result));
                    on_created.call(result);
                });
            }
            Some(SubmitStep::Rejected(e)) => {
                log::warn!("poll form rejected: {e}");
                on_created.call(CreatePollResult::Failed(e.to_string()));
            }
            Some(SubmitStep::Busy) | None => {}
        }
    };

    view! {
      <div class="panel">
        <h2>"Create New Poll"</h2>
        <form class="stack" on:submit=on_submit>
          <label for="question">"Poll Question"</label>
          <input
            id="question"
            type="text"
            placeholder="What would you like to ask?"
            prop:value=move || form.with(|f| f.question().to_string())
            on:input=move |ev| form.update(|f| f.set_question(event_target_value(&ev)))
            prop:disabled=submitting
          />

          <label>"Poll Options"</label>
          <For
            each=move || 0..form.with(|f| f.options().len())
            key=|i| *i
            children=move |i| view! {
              <div class="row">
                <input
                  type="text"
                  placeholder=format!("Option {}", i + 1)
                  prop:value=move || form.with(|f| f.options().get(i).cloned().unwrap_or_default())
                  on:input=move |ev| form.update(|f| f.set_option(i, event_target_value(&ev)))
                  prop:disabled=submitting
                />
                <Show when=move || form.with(|f| f.can_remove_option())>
                  <button type="button" class="remove" on:click=move |_| form.update(|f| {
                    f.remove_option(i);
                  })>"−"</button>
                </Show>
              </div>
            }
          />
          <Show when=move || form.with(|f| f.can_add_option())>
            <button type="button" on:click=move |_| form.update(|f| {
              f.add_option();
            })>"+ Add Option"</button>
          </Show>

          <button type="submit" prop:disabled=move || !form.with(|f| f.can_submit())>
            {move || if submitting() { "Creating Poll..." } else { "Create Poll" }}
          </button>
        </form>
      </div>
    }
}

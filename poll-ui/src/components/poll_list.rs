use crate::bridge;
use crate::components::poll_card::PollCard;
use leptos::*;
use poll_core::list::{refreshing_notice, vote_notice, FetchTicket, PollListState};
use poll_core::notice::Notice;
use poll_core::VoteResult;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn PollList(#[prop(into)] refresh: Signal<u64>, on_notice: Callback<Notice>) -> impl IntoView {
    let client = bridge::use_client();
    let state = create_rw_signal(PollListState::new());

    let load = move |ticket: FetchTicket| {
        let client = client.get_value();
        spawn_local(async move {
            let result = client.get_polls().await;
            if let Some(notice) = state.try_update(|s| s.apply(ticket, result)) {
                on_notice.call(notice);
            }
        });
    };

    create_effect(move |_| {
        let trigger = refresh.get();
        if let Some(ticket) = state.try_update(|s| s.sync_trigger(trigger)).flatten() {
            load(ticket);
        }
    });

    let manual_refresh = move |_: ev::MouseEvent| {
        if let Some(ticket) = state.try_update(|s| s.begin_fetch()) {
            load(ticket);
        }
        on_notice.call(refreshing_notice());
    };

    let on_vote = Callback::new(move |result: VoteResult| {
        let (notice, refetch) = vote_notice(&result);
        on_notice.call(notice);
        if refetch {
            if let Some(ticket) = state.try_update(|s| s.begin_fetch()) {
                load(ticket);
            }
        }
    });

    let loading = move || state.with(|s| s.is_loading());
    let connected = move || state.with(|s| s.is_connected());

    view! {
      <div class="stack">
        <div class="row list-header">
          <h2>"Active Polls"</h2>
          <span class="count">{move || state.with(|s| s.polls().len())}</span>
          {move || if connected() {
            view! { <span class="badge ok">"Connected"</span> }
          } else {
            view! { <span class="badge warn">"Offline"</span> }
          }}
          <button on:click=manual_refresh prop:disabled=loading>"Refresh"</button>
        </div>

        <Show when=move || !connected()>
          <div class="error">
            <p><b>"Connection Issues"</b></p>
            <p class="meta">"Make sure your local DFX network is running with " <code>"dfx start"</code></p>
          </div>
        </Show>

        <Show
          when=move || !loading()
          fallback=|| view! { <div class="panel">"Loading polls..."</div> }
        >
          {move || state.with(|s| s.empty_state()).map(|empty| view! {
            <div class="panel empty">
              <h3>"No Polls Yet"</h3>
              <p class="meta">{empty.message()}</p>
            </div>
          })}
          <div class="grid">
            <For
              each=move || {
                state.with(|s| {
                  let generation = s.generation();
                  s.polls().iter().cloned().map(|p| (generation, p)).collect::<Vec<_>>()
                })
              }
              key=|(generation, poll)| (*generation, poll.id)
              children=move |(_, poll)| view! { <PollCard poll=poll on_vote=on_vote/> }
            />
          </div>
        </Show>
      </div>
    }
}

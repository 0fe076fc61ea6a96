use crate::bridge;
use leptos::*;
use poll_core::card::{plural_votes, PollCard as CardModel};
use poll_core::{Poll, VoteResult};
use wasm_bindgen_futures::spawn_local;

const BAR_COLORS: [&str; 6] = ["blue", "green", "purple", "yellow", "red", "indigo"];

#[component]
pub fn PollCard(poll: Poll, on_vote: Callback<VoteResult>) -> impl IntoView {
    let client = bridge::use_client();
    let id = poll.id;
    let question = poll.question.clone();
    let card = create_rw_signal(CardModel::new(poll));
    let total = card.with_untracked(|c| c.total_votes());
    let rows = card.with_untracked(|c| c.rows());

    let vote = move |option: usize| {
        let Some(option) = card.try_update(|c| c.begin_vote(option)).flatten() else {
            return;
        };
        let client = client.get_value();
        spawn_local(async move {
            let result = client.vote(id, option as u64).await;
            card.update(|c| c.finish_vote(&result));
            on_vote.call(result);
        });
    };

    let options = if rows.is_empty() {
        view! { <div class="warn">"No options available for this poll."</div> }.into_view()
    } else {
        rows.into_iter()
            .map(|row| {
                let index = row.index;
                let selected = move || card.with(|c| c.selected() == Some(index));
                let fill = format!("fill {}", BAR_COLORS[index % BAR_COLORS.len()]);
                view! {
                  <button
                    class="option"
                    class:selected=selected
                    prop:disabled=move || card.with(|c| c.controls_disabled())
                    on:click=move |_| vote(index)
                  >
                    <div class="row">
                      <span>{move || if selected() { "✓ " } else { "" }}{row.label}</span>
                      <span class="meta">{plural_votes(row.votes)} " · " {format!("{}%", row.percentage)}</span>
                    </div>
                    {(total > 0).then(|| view! {
                      <div class="bar">
                        <div
                          class=move || if selected() { "fill green".to_string() } else { fill.clone() }
                          style=format!("width: {}%", row.percentage)
                        ></div>
                      </div>
                    })}
                  </button>
                }
            })
            .collect_view()
    };

    view! {
      <div class="card">
        <div class="row">
          <h3>{question}</h3>
          <span class="meta">{plural_votes(total)}</span>
        </div>
        <div class="stack">{options}</div>
        <div class="row meta">
          <span>{format!("Poll #{id}")}</span>
          <Show when=move || card.with(|c| c.has_voted())>
            <span class="ok">"Voted"</span>
          </Show>
          <Show when=move || card.with(|c| c.is_voting())>
            <span>"Voting..."</span>
          </Show>
        </div>
      </div>
    }
}

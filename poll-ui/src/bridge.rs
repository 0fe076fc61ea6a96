//! The one poll client shared by every component.

use leptos::*;
use poll_agent::PollClient;
use std::rc::Rc;

#[derive(Clone)]
struct SharedClient(Rc<PollClient>);

/// Must run inside the root owner, before any component asks for the client.
pub fn install(client: PollClient) {
    provide_context(SharedClient(Rc::new(client)));
}

/// Stored so event handlers stay `Copy`.
pub fn use_client() -> StoredValue<Rc<PollClient>> {
    store_value(expect_context::<SharedClient>().0)
}

mod app;
mod bridge;

mod components {
    pub mod notification;
    pub mod poll_card;
    pub mod poll_form;
    pub mod poll_list;
}

use app::App;
use leptos::*;
use poll_agent::ServiceConfig;

fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    let config = ServiceConfig::from_env();
    match poll_agent::client(&config) {
        Ok(client) => mount_to_body(move || {
            bridge::install(client);
            view! { <App/> }
        }),
        Err(e) => {
            log::error!("failed to set up poll client: {e}");
            let message = e.to_string();
            mount_to_body(move || view! { <pre class="error">{message}</pre> })
        }
    }
}

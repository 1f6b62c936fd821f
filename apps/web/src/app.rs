use crate::api::ApiClient;
use crate::environment::ClientEnvironment;
use crate::state::{RegistrationState, volunteer_line};
use dioxus::prelude::*;
use tracing::info;
use vhub_domain::environment::Environment;

const PAGE_STYLE: &str = "padding: 20px; max-width: 600px; margin: 0 auto;";
const BADGE_STYLE: &str = "font-size: 0.8em; color: #666; margin-left: 10px;";
const INPUT_STYLE: &str = "padding: 8px; font-size: 16px; width: 200px;";
const PANEL_STYLE: &str =
    "margin-top: 20px; padding: 10px; background-color: #f8f9fa; border-radius: 4px; font-size: 0.9em;";
const ROW_STYLE: &str = "padding: 10px; border-bottom: 1px solid #eee; font-size: 16px;";

fn button_style(environment: Environment) -> String {
    let color = if environment.is_development() { "#28a745" } else { "#007bff" };
    format!(
        "margin-left: 10px; padding: 8px 16px; font-size: 16px; background-color: {color}; \
         color: white; border: none; border-radius: 4px; cursor: pointer;"
    )
}

async fn load_volunteers(client: &ApiClient, mut state: Signal<RegistrationState>) {
    state.write().begin_request();
    let result = client.list_volunteers().await;
    state.write().volunteers_loaded(result);
}

/// Registration page.
#[component]
pub fn App() -> Element {
    let env = use_hook(|| {
        let env = ClientEnvironment::detect();
        info!("Running in {} environment (Auto-detected)", env.environment);
        info!("API URL: {}", env.api_url);
        env
    });
    let client = use_hook(|| ApiClient::new(env.api_url.clone()));
    let mut state = use_signal(RegistrationState::default);

    let list_client = client.clone();
    use_future(move || {
        let client = list_client.clone();
        async move { load_volunteers(&client, state).await }
    });

    let env_client = client.clone();
    use_future(move || {
        let client = env_client.clone();
        async move {
            let result = client.environment().await;
            state.write().environment_loaded(result);
        }
    });

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            state.write().begin_request();
            let name = state.read().input.clone();
            let result = client.create_volunteer(&name).await;
            if state.write().volunteer_saved(result) {
                load_volunteers(&client, state).await;
            }
        });
    };

    let current = state.read().clone();
    let environment = env.environment;

    rsx! {
        div { style: PAGE_STYLE,
            h1 {
                "Volunteer Registration"
                span { style: BADGE_STYLE, "({environment})" }
            }

            form { onsubmit,
                input {
                    r#type: "text",
                    value: "{current.input}",
                    placeholder: "Enter your name",
                    style: INPUT_STYLE,
                    oninput: move |evt| state.write().input = evt.value(),
                }
                button { r#type: "submit", style: button_style(environment), "Submit" }
            }

            if let Some(error) = current.error {
                div { style: "color: red; margin-top: 10px;", "{error}" }
            }

            if let Some(report) = current.environment_json() {
                div { style: PANEL_STYLE,
                    h3 { "Environment Info:" }
                    pre { style: "white-space: pre-wrap;", "{report}" }
                }
            }

            div { style: "margin-top: 20px;",
                h2 { "Registered Volunteers" }
                ul { style: "list-style: none; padding: 0;",
                    for volunteer in current.volunteers.iter() {
                        li { key: "{volunteer.id}", style: ROW_STYLE, {volunteer_line(volunteer)} }
                    }
                }
            }
        }
    }
}

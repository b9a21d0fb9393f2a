/// Options page UI

use crate::controller::{
    GROUP_NAME_EXISTS, OPTIONS_SAVED, OptionsController, check_group_name_input,
    check_instance_input, load_options,
};
use crate::storage::{ChromeStore, OptionsDocument};
use crate::ui::components::{GroupNameList, InstanceRow, StatusText};
use crate::validation::{GROUP_NAME_INPUT_PATTERN, HOST_INPUT_PATTERN};
use gloo_timers::callback::Timeout;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use std::rc::Rc;
use yew::prelude::*;

/// How long a status message stays visible
pub const STATUS_TIMEOUT_MS: u32 = 750;

/// Show `text` in the status line and clear it after `timeout_ms`
///
/// Timeouts are not cancelled, so an older clear can wipe a newer message.
fn set_status_text(status: &UseStateHandle<Option<String>>, text: impl Into<String>, timeout_ms: u32) {
    status.set(Some(text.into()));

    let status = status.clone();
    Timeout::new(timeout_ms, move || status.set(None)).forget();
}

fn input_callback(value: &UseStateHandle<String>) -> Callback<InputEvent> {
    let value = value.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            value.set(input.value());
        }
    })
}

/// Model edits, applied to the state current at dispatch time
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsAction {
    ApplyDocument(OptionsDocument),
    AddInstance { host: String, name: String },
    AddGroupName(String),
    SetEnabled { host: String, enabled: bool },
}

impl Reducible for OptionsController {
    type Action = OptionsAction;

    fn reduce(self: Rc<Self>, action: OptionsAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            OptionsAction::ApplyDocument(document) => next.apply_document(document),
            OptionsAction::AddInstance { host, name } => {
                next.add_instance(&host, &name, true);
            }
            OptionsAction::AddGroupName(name) => {
                next.add_group_name(&name);
            }
            OptionsAction::SetEnabled { host, enabled } => {
                if !next.set_instance_enabled(&host, enabled) {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let controller = use_reducer(OptionsController::new);
    let loading = use_state(|| true);
    let status = use_state(|| None::<String>);
    let host_input = use_state(String::new);
    let name_input = use_state(String::new);
    let group_input = use_state(String::new);

    // Load persisted options on mount, merging into whatever is current by then
    {
        let controller = controller.clone();
        let loading = loading.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_options(&ChromeStore).await {
                    Ok(document) => controller.dispatch(OptionsAction::ApplyDocument(document)),
                    Err(e) => log::error!("Failed to load options: {}", e),
                }
                loading.set(false);
            });
            || ()
        });
    }

    // Checkbox edits apply to the model immediately
    let on_toggle = {
        let controller = controller.clone();

        Callback::from(move |(host, enabled): (String, bool)| {
            controller.dispatch(OptionsAction::SetEnabled { host, enabled });
        })
    };

    let on_add_instance = {
        let controller = controller.clone();
        let status = status.clone();
        let host_input = host_input.clone();
        let name_input = name_input.clone();

        Callback::from(move |_: MouseEvent| {
            match check_instance_input(&host_input, &name_input) {
                Ok((host, name)) => {
                    controller.dispatch(OptionsAction::AddInstance {
                        host: host.to_string(),
                        name: name.to_string(),
                    });
                    host_input.set(String::new());
                    name_input.set(String::new());
                }
                Err(e) => set_status_text(&status, e.to_string(), STATUS_TIMEOUT_MS),
            }
        })
    };

    let on_add_group_name = {
        let controller = controller.clone();
        let status = status.clone();
        let group_input = group_input.clone();

        Callback::from(move |_: MouseEvent| {
            match check_group_name_input(&group_input) {
                Ok(name) => {
                    if controller.group_names().iter().any(|n| n == name) {
                        set_status_text(&status, GROUP_NAME_EXISTS, STATUS_TIMEOUT_MS);
                    } else {
                        controller.dispatch(OptionsAction::AddGroupName(name.to_string()));
                    }
                    group_input.set(String::new());
                }
                Err(e) => set_status_text(&status, e.to_string(), STATUS_TIMEOUT_MS),
            }
        })
    };

    let on_save_instances = {
        let controller = controller.clone();
        let status = status.clone();

        Callback::from(move |_: MouseEvent| {
            let snapshot = (*controller).clone();
            let status = status.clone();

            spawn_local(async move {
                match snapshot.save_instance_options(&ChromeStore).await {
                    Ok(()) => set_status_text(&status, OPTIONS_SAVED, STATUS_TIMEOUT_MS),
                    Err(e) => {
                        log::error!("Failed to save instances: {}", e);
                        set_status_text(&status, e.to_string(), STATUS_TIMEOUT_MS);
                    }
                }
            });
        })
    };

    let on_save_group_names = {
        let controller = controller.clone();
        let status = status.clone();

        Callback::from(move |_: MouseEvent| {
            let snapshot = (*controller).clone();
            let status = status.clone();

            spawn_local(async move {
                let outcome = snapshot.save_group_name_options(&ChromeStore).await;
                set_status_text(&status, outcome.status_message(), STATUS_TIMEOUT_MS);
            });
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="options-title">{"Review Monitor Options"}</h1>

            if *loading {
                <div class="loading-text-center">
                    <Spinner />
                    <p class="loading-text">{"Loading options..."}</p>
                </div>
            }

            <section class="instances-section">
                <h2>{"Instances"}</h2>
                <table id="instances">
                    {for controller.instances().iter().map(|instance| html! {
                        <InstanceRow
                            key={instance.host.clone()}
                            instance={instance.clone()}
                            on_toggle={on_toggle.clone()}
                        />
                    })}
                </table>
                <div class="add-row">
                    <input
                        id="instance-host"
                        type="url"
                        placeholder="https://review.example.com"
                        pattern={HOST_INPUT_PATTERN}
                        value={(*host_input).clone()}
                        oninput={input_callback(&host_input)}
                    />
                    <input
                        id="instance-name"
                        type="text"
                        placeholder="Display name"
                        value={(*name_input).clone()}
                        oninput={input_callback(&name_input)}
                    />
                    <Button onclick={on_add_instance} disabled={*loading} variant={ButtonVariant::Secondary}>
                        {"Add instance"}
                    </Button>
                </div>
                <Button onclick={on_save_instances} disabled={*loading} variant={ButtonVariant::Primary}>
                    {"Save instances"}
                </Button>
            </section>

            <section class="group-names-section">
                <h2>{"Group names"}</h2>
                <GroupNameList names={controller.group_names().to_vec()} />
                <div class="add-row">
                    <input
                        id="group-name"
                        type="text"
                        placeholder="team@example.com"
                        pattern={GROUP_NAME_INPUT_PATTERN}
                        value={(*group_input).clone()}
                        oninput={input_callback(&group_input)}
                    />
                    <Button onclick={on_add_group_name} disabled={*loading} variant={ButtonVariant::Secondary}>
                        {"Add group name"}
                    </Button>
                </div>
                <Button onclick={on_save_group_names} disabled={*loading} variant={ButtonVariant::Primary}>
                    {"Save group names"}
                </Button>
            </section>

            <StatusText message={(*status).clone()} />
        </div>
    }
}

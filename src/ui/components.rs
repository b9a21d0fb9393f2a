/// Reusable UI components

use crate::instance::Instance;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InstanceRowProps {
    pub instance: Instance,
    /// Fired with (host, checked) whenever the checkbox changes
    pub on_toggle: Callback<(String, bool)>,
}

/// One instance: name and host labels plus the enabled checkbox
#[function_component(InstanceRow)]
pub fn instance_row(props: &InstanceRowProps) -> Html {
    let instance = &props.instance;

    let onchange = {
        let host = instance.host.clone();
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_toggle.emit((host.clone(), input.checked()));
            }
        })
    };

    html! {
        <tr class="instance-row">
            <td><label class="instance-name">{&instance.name}</label></td>
            <td><label class="instance-host">{&instance.host}</label></td>
            <td>
                <input
                    type="checkbox"
                    class="instance-enabled"
                    checked={instance.enabled}
                    {onchange}
                />
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupNameListProps {
    pub names: Vec<String>,
}

#[function_component(GroupNameList)]
pub fn group_name_list(props: &GroupNameListProps) -> Html {
    html! {
        <ul class="group-names">
            {for props.names.iter().map(|name| html! {
                <li key={name.clone()} class="group-name">{name}</li>
            })}
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusTextProps {
    #[prop_or_default]
    pub message: Option<String>,
}

/// Transient status line; renders an empty placeholder when idle
#[function_component(StatusText)]
pub fn status_text(props: &StatusTextProps) -> Html {
    html! {
        <p id="status" class="status-text">
            {props.message.clone().unwrap_or_default()}
        </p>
    }
}

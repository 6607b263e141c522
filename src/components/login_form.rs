use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_session::SessionState;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub state: SessionState,
    pub on_login: Callback<(String, String)>,
    pub on_logout: Callback<()>,
}

/// Account login, or the logged-in user with a logout button
#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let account = use_state(String::new);
    let password = use_state(String::new);

    if let Some(session) = props.state.session() {
        let on_logout = {
            let callback = props.on_logout.clone();
            let password = password.clone();
            Callback::from(move |_| {
                password.set(String::new());
                callback.emit(());
            })
        };

        return html! {
            <div class="session-info">
                <p>{"Logged in as "}<strong>{session.display_name()}</strong></p>
                <button class="secondary" onclick={on_logout}>{"Log out"}</button>
            </div>
        };
    }

    let on_account = {
        let account = account.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            account.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let callback = props.on_login.clone();
        let account = account.clone();
        let password = password.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            callback.emit(((*account).clone(), (*password).clone()));
        })
    };

    let busy = props.state.is_logging_in();

    html! {
        <form class="login-form" onsubmit={on_submit}>
            <label>
                {"Account"}
                <input
                    type="text"
                    autocomplete="username"
                    value={(*account).clone()}
                    oninput={on_account}
                    disabled={busy}
                />
            </label>
            <label>
                {"Password"}
                <input
                    type="password"
                    autocomplete="current-password"
                    value={(*password).clone()}
                    oninput={on_password}
                    disabled={busy}
                />
            </label>
            <button type="submit" disabled={busy}>
                { if busy { "Logging in..." } else { "Log in" } }
            </button>
            if let SessionState::Error(msg) = &props.state {
                <p class="form-error">{"❌ "}{msg}</p>
            }
        </form>
    }
}

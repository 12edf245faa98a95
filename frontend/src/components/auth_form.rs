use app_state::auth::{AuthField, AuthForm, AuthMode};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuthPanelProps {
    pub form: AuthForm,
    pub on_field: Callback<(AuthField, String)>,
    pub on_submit: Callback<()>,
    pub on_toggle: Callback<()>,
}

#[function_component(AuthPanel)]
pub fn auth_panel(props: &AuthPanelProps) -> Html {
    let field_handler = |field: AuthField| {
        let on_field = props.on_field.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_field.emit((field, input.value()));
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };

    let form = &props.form;
    let is_signup = form.mode == AuthMode::Signup;

    html! {
        <div class="auth-container">
            <h2 class="auth-title">{form.title()}</h2>
            <form class="auth-form" onsubmit={on_submit}>
                if is_signup {
                    <div class="form-group">
                        <label for="name">{"お名前"}</label>
                        <input
                            type="text"
                            id="name"
                            name="name"
                            value={form.name.clone()}
                            oninput={field_handler(AuthField::Name)}
                            required=true
                            placeholder="山田太郎"
                        />
                    </div>
                }
                <div class="form-group">
                    <label for="email">{"メールアドレス"}</label>
                    <input
                        type="email"
                        id="email"
                        name="email"
                        value={form.email.clone()}
                        oninput={field_handler(AuthField::Email)}
                        required=true
                        placeholder="example@example.com"
                    />
                </div>
                <div class="form-group">
                    <label for="password">{"パスワード"}</label>
                    <input
                        type="password"
                        id="password"
                        name="password"
                        value={form.password.clone()}
                        oninput={field_handler(AuthField::Password)}
                        required=true
                        minlength="6"
                        placeholder="6文字以上"
                    />
                </div>
                <button type="submit" class="auth-submit" disabled={form.submitting}>
                    if form.submitting {
                        <div class="loading-spinner"></div>
                    } else {
                        {form.title()}
                    }
                </button>
            </form>
            if let Some(error) = &form.error {
                <div class="error-message">{error.clone()}</div>
            }
            <div class="auth-switch">
                <button type="button" class="switch-button" onclick={on_toggle}>
                    {form.switch_label()}
                </button>
            </div>
        </div>
    }
}

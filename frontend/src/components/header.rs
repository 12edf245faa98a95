use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    /// Shown only while signed in
    #[prop_or_default]
    pub on_logout: Option<Callback<()>>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <>
            {if let Some(on_logout) = &props.on_logout {
                let on_logout = on_logout.clone();
                html! {
                    <button class="logout-button" onclick={Callback::from(move |_: MouseEvent| on_logout.emit(()))}>
                        {"ログアウト"}
                    </button>
                }
            } else {
                html! {}
            }}
            <header class="header">
                <h1 class="title">{"🦷 デイリースタンプ 🦷"}</h1>
                <p class="subtitle">{"歯磨きを楽しく習慣化しよう！"}</p>
            </header>
        </>
    }
}

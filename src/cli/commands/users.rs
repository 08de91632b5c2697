//! List users command handler

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_list_users(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let usernames = state.account_service.list_usernames().await?;

    print!("{}", render_usernames(&usernames));

    Ok(())
}

/// One username per line; empty output when there are none.
fn render_usernames(usernames: &[String]) -> String {
    usernames.iter().fold(String::new(), |mut out, name| {
        out.push_str(name);
        out.push('\n');
        out
    })
}

use anyhow::Result;
use ensaluti::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (globals, action) = start()?;

    // Handle the action
    match action {
        Action::Login { .. } => actions::login::handle(action, &globals).await?,
        Action::Signup { .. } => actions::signup::handle(action, &globals).await?,
    }

    Ok(())
}

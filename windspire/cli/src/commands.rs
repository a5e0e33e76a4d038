//! Command handlers. Each prints its result as pretty JSON on stdout.

use color_eyre::eyre::{Context, Result};
use serde::Serialize;
use serde_json::json;
use windspire_lib::identity::{AuthMethod, FirebaseRestProvider, IdentityProvider};
use windspire_lib::{ApiClient, BoatCreate, BoatUpdate, PaginationParams, UserSearch};

use super::{AuthCommand, BoatFields, BoatsCommand, CountriesCommand, PageArgs, UsersCommand};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).wrap_err("Failed to render output")?;
    println!("{rendered}");
    Ok(())
}

impl From<PageArgs> for PaginationParams {
    fn from(args: PageArgs) -> Self {
        Self {
            page: args.page,
            limit: args.limit,
        }
    }
}

impl From<BoatFields> for BoatCreate {
    fn from(fields: BoatFields) -> Self {
        Self {
            name: fields.name,
            brand: fields.brand,
            model: fields.model,
            sail_number: fields.sail_number,
            country_id: fields.country_id,
        }
    }
}

impl From<BoatFields> for BoatUpdate {
    fn from(fields: BoatFields) -> Self {
        Self {
            name: fields.name,
            brand: fields.brand,
            model: fields.model,
            sail_number: fields.sail_number,
            country_id: fields.country_id,
        }
    }
}

pub async fn boats(client: &ApiClient, command: BoatsCommand) -> Result<()> {
    let api = client.boats();
    match command {
        BoatsCommand::List(page) => print_json(&api.get_boats(page.into()).await?),
        BoatsCommand::Mine => print_json(&api.get_my_boats().await?),
        BoatsCommand::Get { id } => print_json(&api.get_boat(&id).await?),
        BoatsCommand::Create(fields) => print_json(&api.create_boat(&fields.into()).await?),
        BoatsCommand::Update { id, fields } => {
            print_json(&api.update_boat(&id, &fields.into()).await?)
        }
        BoatsCommand::Delete { id } => {
            api.delete_boat(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
        BoatsCommand::AddOwner { boat_id, owner_id } => {
            api.add_owner(&boat_id, &owner_id).await?;
            print_json(&json!({ "boat_id": boat_id, "added_owner": owner_id }))
        }
        BoatsCommand::RemoveOwner { boat_id, owner_id } => {
            api.remove_owner(&boat_id, &owner_id).await?;
            print_json(&json!({ "boat_id": boat_id, "removed_owner": owner_id }))
        }
    }
}

pub async fn users(client: &ApiClient, command: UsersCommand) -> Result<()> {
    let api = client.users();
    match command {
        UsersCommand::List(page) => print_json(&api.get_users(page.into()).await?),
        UsersCommand::Get { id } => print_json(&api.get_user(&id).await?),
        UsersCommand::Search { query } => {
            let search = api.search_users(&query).await;
            if let UserSearch::Unavailable { reason } = &search {
                tracing::warn!(%reason, "Search returned no results because the user list is unavailable");
            }
            print_json(&search.matches())
        }
    }
}

pub async fn countries(client: &ApiClient, command: CountriesCommand) -> Result<()> {
    let api = client.countries();
    match command {
        CountriesCommand::List => print_json(&api.get_countries().await?),
        CountriesCommand::Get { id } => print_json(&api.get_country(&id).await?),
        CountriesCommand::Code { code } => print_json(&api.get_country_by_code(&code).await?),
    }
}

pub async fn auth(client: &ApiClient, command: AuthCommand) -> Result<()> {
    let api = client.auth();
    match command {
        AuthCommand::Login { email, password } => {
            let credential = provider()?
                .authenticate(AuthMethod::EmailPassword { email, password })
                .await?;
            print_json(&api.exchange(&credential).await?)
        }
        AuthCommand::Signup {
            email,
            password,
            name,
        } => {
            let credential = provider()?
                .authenticate(AuthMethod::SignUp {
                    email,
                    password,
                    display_name: name,
                })
                .await?;
            tracing::info!("Verification email sent");
            print_json(&api.exchange(&credential).await?)
        }
        AuthCommand::ResetPassword { email } => {
            provider()?.send_password_reset(&email).await?;
            print_json(&json!({ "password_reset_sent": email }))
        }
        AuthCommand::Whoami => print_json(&api.current_user().await?),
        AuthCommand::Refresh => {
            api.refresh().await?;
            print_json(&json!({ "refreshed": true }))
        }
        AuthCommand::Logout => {
            api.logout()?;
            print_json(&json!({ "authenticated": false }))
        }
        AuthCommand::Status => print_json(&json!({
            "authenticated": client.is_authenticated(),
            "base_url": client.base_url(),
        })),
    }
}

fn provider() -> Result<FirebaseRestProvider> {
    FirebaseRestProvider::from_env().wrap_err("Firebase sign-in is not configured")
}

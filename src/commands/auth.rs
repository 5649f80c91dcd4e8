//! Account and session command handlers.
//!
//! This module implements the CLI commands for:
//! - `grana register` - Create an account on the server
//! - `grana login` - Sign in and save the session token
//! - `grana logout` - Delete the saved session token
//! - `grana status` - Report configuration and session state

use crate::api::{FinanceApi, TokenFile};
use crate::args::{LoginArgs, RegisterArgs};
use crate::commands::Out;
use crate::error::is_unauthorized;
use crate::model::{LoginForm, MonthRef, RegisterForm};
use crate::{Config, Result};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Handles the `grana register` command.
///
/// Validates the registration form and creates the account on the server.
/// The password is prompted for interactively when not given on the command
/// line, so it stays out of the shell history.
///
/// # Errors
/// Returns the collected field messages when the form is invalid, and an error
/// when the server refuses the registration (for example a duplicate e-mail).
pub async fn register(api: &mut dyn FinanceApi, args: &RegisterArgs) -> Result<Out<()>> {
    let password = match args.password() {
        Some(p) => p.to_string(),
        None => rpassword::prompt_password("Senha: ").context("Unable to read the password")?,
    };
    let form = RegisterForm {
        name: args.name().map(str::to_string),
        email: args.email().map(str::to_string),
        password: Some(password),
    };
    let registration = form.validate()?;
    api.register(&registration)
        .await
        .context("Unable to create the account")?;
    Ok(format!(
        "Conta criada com sucesso! Sign in with 'grana login --email {}'",
        registration.email
    )
    .into())
}

/// Handles the `grana login` command.
///
/// Validates the credentials, exchanges them for a bearer token, and saves
/// the token file so later commands can authenticate. The password is
/// prompted for interactively when not given on the command line.
///
/// # Errors
/// Returns the collected field messages when the form is invalid, and an
/// `ApiError::Unauthorized` (wrapped) when the server refuses the credentials.
pub async fn login(
    config: &Config,
    api: &mut dyn FinanceApi,
    args: &LoginArgs,
) -> Result<Out<()>> {
    let password = match args.password() {
        Some(p) => p.to_string(),
        None => rpassword::prompt_password("Senha: ").context("Unable to read the password")?,
    };
    let form = LoginForm {
        email: args.email().map(str::to_string),
        password: Some(password),
    };
    let credentials = form.validate()?;
    let token = api.login(&credentials).await.context("Unable to sign in")?;
    TokenFile::new(token, credentials.email.clone())
        .save(&config.token_path())
        .await?;
    Ok(format!("Signed in as {}", credentials.email).into())
}

/// Handles the `grana logout` command by deleting the token file.
pub async fn logout(config: &Config) -> Result<Out<()>> {
    if TokenFile::delete(&config.token_path()).await? {
        Ok("Signed out, the saved session was deleted".into())
    } else {
        Ok("There was no saved session to delete".into())
    }
}

/// The outcome of checking the saved session against the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenState {
    /// No token file is saved.
    Missing,
    /// The server accepted the token on a probe request.
    Accepted,
    /// The server answered 401 for the saved token.
    Rejected,
    /// The probe request failed before the server could judge the token.
    Unverified,
}

serde_plain::derive_display_from_serialize!(TokenState);

/// What `grana status` reports.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub grana_home: PathBuf,
    pub api_url: String,
    pub email: Option<String>,
    pub token_state: TokenState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_error: Option<String>,
}

/// Handles the `grana status` command.
///
/// Reports where the grana home points, which server is configured, and
/// whether a session is saved. When a token is present, a one-month list
/// request probes whether the server still accepts it, so an expired token
/// reads differently from an unreachable server.
pub async fn status(
    today: NaiveDate,
    config: &Config,
    api: &mut dyn FinanceApi,
) -> Result<Out<Status>> {
    let token_file = TokenFile::load_if_present(&config.token_path()).await?;

    let mut status = Status {
        grana_home: config.root().to_path_buf(),
        api_url: config.api_url().to_string(),
        email: token_file.as_ref().map(|t| t.email().to_string()),
        token_state: TokenState::Missing,
        probe_error: None,
    };
    if token_file.is_some() {
        match api.list_transactions(Some(MonthRef::from_date(today))).await {
            Ok(_) => status.token_state = TokenState::Accepted,
            Err(e) if is_unauthorized(&e) => status.token_state = TokenState::Rejected,
            Err(e) => {
                status.token_state = TokenState::Unverified;
                status.probe_error = Some(format!("{e:#}"));
            }
        }
    }

    let message = status_message(&status);
    Ok(Out::new(message, status))
}

fn status_message(status: &Status) -> String {
    let session = match (&status.email, status.token_state) {
        (Some(email), TokenState::Accepted) => {
            format!("signed in as {email}, the server accepts the token")
        }
        (Some(email), TokenState::Rejected) => {
            format!("signed in as {email}, but the server rejected the token, run 'grana login'")
        }
        (Some(email), TokenState::Unverified) => format!(
            "signed in as {email}, could not verify the token: {}",
            status.probe_error.as_deref().unwrap_or("unknown error")
        ),
        _ => "not signed in, run 'grana login'".to_string(),
    };
    format!(
        "Grana home: {}\nAPI server: {}\nSession: {session}",
        status.grana_home.display(),
        status.api_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{TestApi, TEST_EMAIL, TEST_PASSWORD, TEST_TOKEN};
    use crate::test::TestEnv;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[tokio::test]
    async fn test_login_saves_the_token() {
        let env = TestEnv::new().await;
        let config = env.config();
        let mut api = TestApi::default();
        let args = LoginArgs::new(
            Some(TEST_EMAIL.to_string()),
            Some(TEST_PASSWORD.to_string()),
        );

        let out = login(&config, &mut api, &args).await.unwrap();

        assert!(out.message().contains(TEST_EMAIL));
        let saved = TokenFile::load(&config.token_path()).await.unwrap();
        assert_eq!(saved.token(), TEST_TOKEN);
        assert_eq!(saved.email(), TEST_EMAIL);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_credentials() {
        let env = TestEnv::new().await;
        let mut api = TestApi::default();
        let args = LoginArgs::new(Some(TEST_EMAIL.to_string()), Some("errada".to_string()));

        let err = login(&env.config(), &mut api, &args).await.unwrap_err();

        assert!(is_unauthorized(&err));
        assert!(!env.config().token_path().exists());
    }

    #[tokio::test]
    async fn test_login_reports_form_problems() {
        let env = TestEnv::new().await;
        let mut api = TestApi::default();
        let args = LoginArgs::new(Some("not-an-email".to_string()), Some("segredo".to_string()));

        let err = login(&env.config(), &mut api, &args).await.unwrap_err();

        assert!(err.to_string().contains("invalid field"));
    }

    #[tokio::test]
    async fn test_register_creates_the_account() {
        let mut api = TestApi::default();
        let args = RegisterArgs::new(
            Some("Ana Souza".to_string()),
            Some("ana@example.com".to_string()),
            Some("segredo".to_string()),
        );

        let out = register(&mut api, &args).await.unwrap();

        let contains = "Conta criada com sucesso!";
        assert!(
            out.message().contains(contains),
            "Expected message to contain '{contains}', but message was {}",
            out.message()
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut api = TestApi::default();
        let args = RegisterArgs::new(
            Some("Maria".to_string()),
            Some(TEST_EMAIL.to_string()),
            Some("segredo".to_string()),
        );

        let err = register(&mut api, &args).await.unwrap_err();

        assert!(format!("{err:#}").contains("E-mail já cadastrado"));
    }

    #[tokio::test]
    async fn test_register_reports_form_problems() {
        let mut api = TestApi::default();
        let args = RegisterArgs::new(
            Some("Al".to_string()),
            Some("al@example.com".to_string()),
            Some("12345".to_string()),
        );

        let err = register(&mut api, &args).await.unwrap_err();

        let text = err.to_string();
        assert!(text.contains("2 invalid fields"));
    }

    #[tokio::test]
    async fn test_logout_reports_whether_a_session_existed() {
        let env = TestEnv::new().await;
        let config = env.config();

        let out = logout(&config).await.unwrap();
        assert!(out.message().contains("no saved session"));

        TokenFile::new(TEST_TOKEN, TEST_EMAIL)
            .save(&config.token_path())
            .await
            .unwrap();
        let out = logout(&config).await.unwrap();
        assert!(out.message().contains("Signed out"));
        assert!(!config.token_path().exists());
    }

    #[tokio::test]
    async fn test_status_without_a_session() {
        let env = TestEnv::new().await;
        let mut api = TestApi::default();

        let out = status(today(), &env.config(), &mut api).await.unwrap();

        assert!(out.message().contains("not signed in"));
        let reported = out.structure().unwrap();
        assert_eq!(reported.token_state, TokenState::Missing);
        assert!(reported.email.is_none());
    }

    #[tokio::test]
    async fn test_status_with_an_accepted_token() {
        let env = TestEnv::new().await;
        let config = env.config();
        TokenFile::new(TEST_TOKEN, TEST_EMAIL)
            .save(&config.token_path())
            .await
            .unwrap();
        let mut api = TestApi::signed_in(Some(TEST_TOKEN.to_string()));

        let out = status(today(), &config, &mut api).await.unwrap();

        assert!(out.message().contains(TEST_EMAIL));
        assert_eq!(out.structure().unwrap().token_state, TokenState::Accepted);
    }

    #[tokio::test]
    async fn test_status_with_a_rejected_token() {
        let env = TestEnv::new().await;
        let config = env.config();
        TokenFile::new("stale-token", TEST_EMAIL)
            .save(&config.token_path())
            .await
            .unwrap();
        let mut api = TestApi::signed_in(Some("stale-token".to_string()));

        let out = status(today(), &config, &mut api).await.unwrap();

        assert!(out.message().contains("run 'grana login'"));
        assert_eq!(out.structure().unwrap().token_state, TokenState::Rejected);
    }

    #[test]
    fn test_status_message_unverified() {
        let status = Status {
            grana_home: PathBuf::from("/home/u/.grana"),
            api_url: "http://localhost:8080/api".to_string(),
            email: Some(TEST_EMAIL.to_string()),
            token_state: TokenState::Unverified,
            probe_error: Some("could not reach the API".to_string()),
        };
        let message = status_message(&status);
        assert!(message.contains("could not verify the token"));
        assert!(message.contains("could not reach the API"));
    }
}

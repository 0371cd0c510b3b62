//! Browser implementation of the authentication gateway. Sign-in and
//! registration are unauthenticated calls, so a 401 here is a failed sign-in
//! and never tears the session down; the profile update carries the
//! credential and goes through the authorized path.

use crate::app_lib::{ApiClient, append_field, append_file, new_form_data};
use identity::User;
use serde::Deserialize;
use session::{AuthGateway, GatewayError, LoginCredentials, ProfileUpdate, Registration};
use std::rc::Rc;

/// Payload of the sign-in endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthTokens {
    access_token: String,
}

pub struct WebAuthGateway {
    api: Rc<ApiClient>,
}

impl WebAuthGateway {
    pub fn new(api: Rc<ApiClient>) -> Self {
        Self { api }
    }
}

impl AuthGateway for WebAuthGateway {
    type Attachment = web_sys::File;

    async fn login(&self, credentials: &LoginCredentials) -> Result<String, GatewayError> {
        let tokens: AuthTokens = self.api.post_json("user/auth/login", credentials).await?;
        Ok(tokens.access_token)
    }

    async fn register(
        &self,
        registration: &Registration<web_sys::File>,
    ) -> Result<String, GatewayError> {
        let form = new_form_data()?;
        append_field(&form, "name", &registration.name)?;
        append_field(&form, "email", &registration.email)?;
        append_field(&form, "password", &registration.password)?;
        if let Some(avatar) = &registration.avatar {
            append_file(&form, "avatar", avatar)?;
        }

        let tokens: AuthTokens = self.api.post_multipart("user/auth/register", &form).await?;
        Ok(tokens.access_token)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate<web_sys::File>,
    ) -> Result<User, GatewayError> {
        let form = new_form_data()?;
        if let Some(name) = &update.name {
            append_field(&form, "name", name)?;
        }
        if let Some(current_password) = &update.current_password {
            append_field(&form, "current_password", current_password)?;
        }
        if let Some(new_password) = &update.new_password {
            append_field(&form, "new_password", new_password)?;
        }
        if let Some(avatar) = &update.avatar {
            append_file(&form, "avatar", avatar)?;
        }

        self.api
            .put_multipart_authorized(&format!("user/{user_id}"), &form)
            .await
    }
}

use reqwest::multipart::Form;
use serde::Serialize;

use crate::core::errors::{ClientError, ClientResult};
use crate::forms::is_blank;
use crate::media::MediaFile;

pub const MSG_SIGN_IN_REQUIRED: &str = "Please fill in both email and password";
pub const MSG_SIGN_UP_REQUIRED: &str = "Please fill in all fields";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_TERMS: &str = "You must agree to the terms and conditions";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> ClientResult<Credentials> {
        if is_blank(&self.email) || self.password.is_empty() {
            return Err(ClientError::validation(MSG_SIGN_IN_REQUIRED));
        }
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agreed_to_terms: bool,
    pub profile_image: Option<MediaFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile_image: Option<MediaFile>,
}

impl SignUpForm {
    pub fn validate(&self) -> ClientResult<Registration> {
        if is_blank(&self.full_name)
            || is_blank(&self.email)
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ClientError::validation(MSG_SIGN_UP_REQUIRED));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::validation(MSG_PASSWORD_MISMATCH));
        }
        if !self.agreed_to_terms {
            return Err(ClientError::validation(MSG_TERMS));
        }
        Ok(Registration {
            username: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            profile_image: self.profile_image.clone(),
        })
    }
}

impl Registration {
    pub fn to_form(&self) -> ClientResult<Form> {
        let form = Form::new()
            .text("username", self.username.clone())
            .text("email", self.email.clone())
            .text("password", self.password.clone());
        Ok(match &self.profile_image {
            Some(image) => form.part("file", image.to_part()?),
            None => form,
        })
    }
}

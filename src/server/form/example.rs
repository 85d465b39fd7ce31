use serde::{Deserialize, Serialize};

use crate::server::form::{clean_text, user::clean_email, FormErrors, TextRules};

const NAME: TextRules<'static> = TextRules {
    label: "Name",
    min_chars: 2,
    max_chars: 100,
};

const MESSAGE: TextRules<'static> = TextRules {
    label: "Message",
    min_chars: 10,
    max_chars: 1000,
};

/// Contact form demonstrating validated, CSRF protected submission
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ExampleForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidExample {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ExampleForm {
    pub fn validate(&self) -> Result<ValidExample, FormErrors> {
        let mut errors = FormErrors::default();

        let name = clean_text(&mut errors, "name", &self.name, &NAME);
        let email = clean_email(&mut errors, "email", &self.email, true);
        let message = clean_text(&mut errors, "message", &self.message, &MESSAGE);

        errors.into_result(ValidExample {
            name,
            email: email.unwrap_or_default(),
            message,
        })
    }
}

/// Flash text shown after a successful submission
pub fn thank_you_message(valid: &ValidExample) -> String {
    format!(
        "Thank you {}! Your message has been received. We will contact you at {} if needed.",
        valid.name, valid.email
    )
}

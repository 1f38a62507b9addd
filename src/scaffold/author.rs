//! Author strings: `Name Lastname <name@example.com>, Company Name`.

use crate::error::BuilderError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl Author {
    /// Email and company are optional; the name is not.
    pub fn parse(input: &str) -> Result<Self, BuilderError> {
        let (person, company) = match input.split_once(',') {
            Some((person, company)) => (person, non_empty(company)),
            None => (input, None),
        };

        let (name, email) = match person.split_once('<') {
            Some((name, rest)) => {
                let email = rest.strip_suffix('>').or_else(|| rest.trim_end().strip_suffix('>'));
                let Some(email) = email else {
                    return Err(BuilderError::InvalidInput(format!(
                        "Invalid author '{}': email must be enclosed in <>",
                        input
                    )));
                };
                (name, non_empty(email))
            }
            None => (person, None),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(BuilderError::InvalidInput(format!(
                "Invalid author '{}': a name is required",
                input
            )));
        }

        Ok(Self {
            name: name.to_string(),
            email,
            company,
        })
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(email) = &self.email {
            write!(f, " <{}>", email)?;
        }
        if let Some(company) = &self.company {
            write!(f, ", {}", company)?;
        }
        Ok(())
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

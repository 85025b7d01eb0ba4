//! Update filters.
//!
//! A [`Filter`] is a pure predicate over an [`Update`]. Leaf filters inspect one aspect of the
//! update (text, command, chat type, sender, callback payload, update type); `&`, `|` and `!`
//! combine them. A filter never fails: when the field it looks at is missing it returns false.

use std::ops::{BitAnd, BitOr, Not};

use maxbot_core::{ChatType, Update, UpdateType};

/// Predicate over an update, evaluated recursively.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    /// Always matches.
    #[default]
    Any,
    /// Message with any non-empty text.
    Text,
    /// Message text equal to one of the values.
    TextEq(Vec<String>),
    /// Message text containing the substring.
    TextContains(String),
    /// Leading command equal to one of the names (stored with the leading `/`).
    Commands(Vec<String>),
    /// Message text starting with `/`.
    AnyCommand,
    ChatTypes(Vec<ChatType>),
    /// Acting user id is one of the ids.
    Users(Vec<i64>),
    /// Callback payload equal to one of the values.
    CallbackData(Vec<String>),
    CallbackPrefix(String),
    /// Any callback, with or without payload.
    AnyCallback,
    UpdateTypes(Vec<UpdateType>),
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
    Not(Box<Filter>),
}

fn owned<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl Filter {
    pub fn any() -> Self {
        Filter::Any
    }

    pub fn text() -> Self {
        Filter::Text
    }

    pub fn text_eq<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::TextEq(owned(values))
    }

    pub fn text_contains(needle: impl Into<String>) -> Self {
        Filter::TextContains(needle.into())
    }

    /// Matches the given commands. Names may be passed with or without the leading `/`.
    pub fn command<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|n| {
                let n: String = n.into();
                if n.starts_with('/') {
                    n
                } else {
                    format!("/{}", n)
                }
            })
            .collect();
        Filter::Commands(names)
    }

    pub fn any_command() -> Self {
        Filter::AnyCommand
    }

    pub fn chat_type(types: impl IntoIterator<Item = ChatType>) -> Self {
        Filter::ChatTypes(types.into_iter().collect())
    }

    pub fn user(ids: impl IntoIterator<Item = i64>) -> Self {
        Filter::Users(ids.into_iter().collect())
    }

    pub fn callback_data<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::CallbackData(owned(values))
    }

    pub fn callback_prefix(prefix: impl Into<String>) -> Self {
        Filter::CallbackPrefix(prefix.into())
    }

    pub fn any_callback() -> Self {
        Filter::AnyCallback
    }

    pub fn update_type(types: impl IntoIterator<Item = UpdateType>) -> Self {
        Filter::UpdateTypes(types.into_iter().collect())
    }

    pub fn and(self, other: Filter) -> Self {
        Filter::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Filter) -> Self {
        Filter::Or(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> Self {
        Filter::Not(Box::new(self))
    }

    /// Evaluates the filter against `update`.
    pub fn matches(&self, update: &Update) -> bool {
        match self {
            Filter::Any => true,
            Filter::Text => update.text().is_some_and(|t| !t.is_empty()),
            Filter::TextEq(values) => update
                .text()
                .is_some_and(|t| values.iter().any(|v| v == t)),
            Filter::TextContains(needle) => update.text().is_some_and(|t| t.contains(needle.as_str())),
            Filter::Commands(names) => update
                .message
                .as_ref()
                .and_then(|m| m.command())
                .is_some_and(|cmd| names.iter().any(|n| n == cmd)),
            Filter::AnyCommand => update
                .message
                .as_ref()
                .and_then(|m| m.command())
                .is_some(),
            Filter::ChatTypes(types) => update
                .message
                .as_ref()
                .and_then(|m| m.chat_type())
                .is_some_and(|t| types.contains(&t)),
            Filter::Users(ids) => update.actor().is_some_and(|u| ids.contains(&u.user_id)),
            Filter::CallbackData(values) => callback_payload(update)
                .is_some_and(|p| values.iter().any(|v| v == p)),
            Filter::CallbackPrefix(prefix) => {
                callback_payload(update).is_some_and(|p| p.starts_with(prefix.as_str()))
            }
            Filter::AnyCallback => update.callback.is_some(),
            Filter::UpdateTypes(types) => types.contains(&update.update_type),
            Filter::And(a, b) => a.matches(update) && b.matches(update),
            Filter::Or(a, b) => a.matches(update) || b.matches(update),
            Filter::Not(inner) => !inner.matches(update),
        }
    }
}

fn callback_payload(update: &Update) -> Option<&str> {
    update.callback.as_ref().and_then(|c| c.payload.as_deref())
}

impl BitAnd for Filter {
    type Output = Filter;

    fn bitand(self, rhs: Filter) -> Filter {
        self.and(rhs)
    }
}

impl BitOr for Filter {
    type Output = Filter;

    fn bitor(self, rhs: Filter) -> Filter {
        self.or(rhs)
    }
}

impl Not for Filter {
    type Output = Filter;

    fn not(self) -> Filter {
        self.negate()
    }
}

use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, StoreError};

/// Action data: string keys, values of any depth.
pub type Payload = Map<String, Value>;

/// Name of an action kind.
///
/// Declare the types a module understands as constants:
///
/// ```rust
/// use revived_core::ActionType;
///
/// pub const ATTACK_STARTED: ActionType = ActionType::from_static("attack_started");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(transparent))]
pub struct ActionType(Cow<'static, str>);

impl ActionType {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionType({:?})", self.as_str())
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&'static str> for ActionType {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// An action: its type plus a payload.
///
/// The type is kept as metadata next to the payload rather than inside it.
/// On the wire the two are flattened into one object, `{"type": "...",
/// ...payload}`. A payload entry named `type` is dropped when serializing:
/// the action type always owns that key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Deserialize))]
pub struct Action {
    #[cfg_attr(feature = "serialize", serde(rename = "type"))]
    action_type: ActionType,
    #[cfg_attr(feature = "serialize", serde(flatten))]
    data: Payload,
}

impl Action {
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: action_type.into(),
            data: Payload::new(),
        }
    }

    pub fn with_data(action_type: impl Into<ActionType>, data: Payload) -> Self {
        Self {
            action_type: action_type.into(),
            data,
        }
    }

    /// Serializes `payload` into the action data.
    ///
    /// Fails with [`StoreError::PayloadNotObject`] unless `payload` serializes
    /// to a JSON object (a struct or a map).
    pub fn from_payload<T: serde::Serialize>(
        action_type: impl Into<ActionType>,
        payload: &T,
    ) -> Result<Self> {
        match serde_json::to_value(payload)? {
            Value::Object(data) => Ok(Self::with_data(action_type, data)),
            _ => Err(StoreError::PayloadNotObject),
        }
    }

    /// Builder-style insert of one payload entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    pub fn is(&self, action_type: &ActionType) -> bool {
        &self.action_type == action_type
    }

    pub fn data(&self) -> &Payload {
        &self.data
    }

    pub fn into_data(self) -> Payload {
        self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Deserializes the whole payload into `T`.
    pub fn payload<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.data.clone()))?)
    }
}

#[cfg(feature = "serialize")]
impl Serialize for Action {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let entries = self.data.iter().filter(|(k, _)| k.as_str() != "type");
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.action_type)?;
        for (k, v) in entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Builds a payload from `(key, value)` pairs.
pub fn payload<K, I>(entries: I) -> Payload
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// A function bound to an action type.
///
/// The function only describes the data; the creator wraps it into an
/// [`Action`] of the bound type. Returning `None` yields an empty payload.
pub struct ActionCreator<F> {
    action_type: ActionType,
    f: F,
}

impl<F> ActionCreator<F> {
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    pub fn create<Args>(&self, args: Args) -> Action
    where
        F: Fn(Args) -> Option<Payload>,
    {
        Action::with_data(self.action_type.clone(), (self.f)(args).unwrap_or_default())
    }
}

pub fn action_creator<Args, F>(action_type: impl Into<ActionType>, f: F) -> ActionCreator<F>
where
    F: Fn(Args) -> Option<Payload>,
{
    ActionCreator {
        action_type: action_type.into(),
        f,
    }
}

use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
};

use super::SboString;

impl Serialize for SboString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match core::str::from_utf8(self.as_bytes()) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => serializer.serialize_bytes(self.as_bytes()),
        }
    }
}

struct SboStringVisitor;

impl<'de> Visitor<'de> for SboStringVisitor {
    type Value = SboString;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a byte array")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<SboString, E> {
        SboString::from_bytes(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<SboString, E> {
        SboString::from_bytes(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SboString, A::Error> {
        let mut s = SboString::new();
        if let Some(hint) = seq.size_hint() {
            s.reserve(hint.saturating_add(1)).map_err(de::Error::custom)?;
        }
        while let Some(byte) = seq.next_element::<u8>()? {
            s.push(byte).map_err(de::Error::custom)?;
        }
        Ok(s)
    }
}

impl<'de> Deserialize<'de> for SboString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_byte_buf(SboStringVisitor)
    }
}

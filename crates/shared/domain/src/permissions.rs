use bitflags::bitflags;
use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Screen-level permissions granted to a user.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Permissions: u32 {
        const VIEW_CONTRACTS = 1 << 0;
        const MANAGE_CONTRACTS = 1 << 1;
        const VIEW_FLEET = 1 << 2;
        const MANAGE_FLEET = 1 << 3;
        const VIEW_GARAGE = 1 << 4;
        const MANAGE_GARAGE = 1 << 5;
        const VIEW_INVENTORY = 1 << 6;
        const MANAGE_INVENTORY = 1 << 7;
        const MANAGE_USERS = 1 << 8;
        const VIEW_REPORTS = 1 << 9;

        const ALL = (1 << 10) - 1;
    }
}

/// Backend permission codes, in serialization order.
const CODES: [(&str, Permissions); 10] = [
    ("contracts.view", Permissions::VIEW_CONTRACTS),
    ("contracts.manage", Permissions::MANAGE_CONTRACTS),
    ("fleet.view", Permissions::VIEW_FLEET),
    ("fleet.manage", Permissions::MANAGE_FLEET),
    ("garage.view", Permissions::VIEW_GARAGE),
    ("garage.manage", Permissions::MANAGE_GARAGE),
    ("inventory.view", Permissions::VIEW_INVENTORY),
    ("inventory.manage", Permissions::MANAGE_INVENTORY),
    ("users.manage", Permissions::MANAGE_USERS),
    ("reports.view", Permissions::VIEW_REPORTS),
];

impl From<&str> for Permissions {
    fn from(code: &str) -> Self {
        match code {
            "all" | "*" => Self::ALL,
            _ => CODES.iter().find(|(c, _)| *c == code).map_or(Self::empty(), |(_, p)| *p),
        }
    }
}

impl Permissions {
    /// Backend codes for every flag set, in a stable order.
    pub fn codes(self) -> impl Iterator<Item = &'static str> {
        CODES.into_iter().filter(move |(_, p)| self.contains(*p)).map(|(c, _)| c)
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let codes: Vec<_> = self.codes().collect();
        let mut seq = serializer.serialize_seq(Some(codes.len()))?;
        for code in codes {
            seq.serialize_element(code)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Permissions {
    /// Unknown codes are ignored.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CodesVisitor;

        impl<'de> Visitor<'de> for CodesVisitor {
            type Value = Permissions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of permission codes")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut permissions = Permissions::empty();
                while let Some(code) = seq.next_element::<String>()? {
                    permissions |= Permissions::from(code.as_str());
                }
                Ok(permissions)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Permissions::empty())
            }
        }

        deserializer.deserialize_any(CodesVisitor)
    }
}

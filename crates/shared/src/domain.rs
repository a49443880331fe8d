use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(CountryId);
id_newtype!(CityId);

impl CountryId {
    /// Reserved id meaning "no existing country selected; create one".
    pub const NEW: CountryId = CountryId(0);

    pub fn is_new(self) -> bool {
        self == Self::NEW
    }
}

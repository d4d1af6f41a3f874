use std::str::FromStr;

use bitflags::bitflags;
use parking_lot::RwLock;
use tracing::debug;

use crate::catalog::ConfigLookup;
use crate::constants::*;
use crate::ParamValue;
use crate::ParameterBag;

pub const ACCESS_FLAGS: &str = "Flags";
pub const ACCESS_PRODUCT_ITEM_REF: &str = "ProductItemRef";
pub const ACCESS_BOX_MASK: &str = "BoxMask";
pub const ACCESS_SERIAL_NUMBER: &str = "SerialNumber";
pub const ACCESS_USER_DEFINED_ID: &str = "UserDefinedId";
pub const ACCESS_USER_DEFINED_TEXT: &str = "UserDefinedText";
pub const ACCESS_SERVER: &str = "Server";

bitflags! {
    /// Which access values the SDK applies when opening a license
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AccessFlags: u32 {
        const PRODUCT_ITEM_REF = 1;
        const BOX_MASK_AND_SERIAL = 2;
        const USER_DEFINED_ID = 4;
        const USER_DEFINED_TEXT = 8;
        const SERVER = 16;
    }
}

/// Values handed to the SDK's access call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessData {
    pub flags: AccessFlags,
    pub product_item_ref: u16,
    pub box_mask: u16,
    pub serial_number: u32,
    pub user_defined_id: u32,
    pub user_defined_text: String,
    pub server: String,
}

impl Default for AccessData {
    fn default() -> Self {
        Self {
            flags: AccessFlags::empty(),
            product_item_ref: 0,
            box_mask: 0,
            serial_number: 0,
            user_defined_id: 0,
            user_defined_text: String::new(),
            server: DEFAULT_ACCESS_SERVER.to_string(),
        }
    }
}

impl AccessData {
    pub fn to_bag(&self) -> ParameterBag {
        ParameterBag::new()
            .with(ACCESS_FLAGS, self.flags.bits())
            .with(ACCESS_PRODUCT_ITEM_REF, self.product_item_ref)
            .with(ACCESS_BOX_MASK, self.box_mask)
            .with(ACCESS_SERIAL_NUMBER, self.serial_number)
            .with(ACCESS_USER_DEFINED_ID, self.user_defined_id)
            .with(ACCESS_USER_DEFINED_TEXT, self.user_defined_text.as_str())
            .with(ACCESS_SERVER, self.server.as_str())
    }

    /// Copies every value present in `bag`; absent or ill-typed values are kept
    fn update_from_bag(
        &mut self,
        bag: &ParameterBag,
    ) {
        if let Some(v) = int_value(bag, ACCESS_FLAGS) {
            self.flags = AccessFlags::from_bits_retain(v);
        }
        if let Some(v) = int_value(bag, ACCESS_PRODUCT_ITEM_REF) {
            self.product_item_ref = v;
        }
        if let Some(v) = int_value(bag, ACCESS_BOX_MASK) {
            self.box_mask = v;
        }
        if let Some(v) = int_value(bag, ACCESS_SERIAL_NUMBER) {
            self.serial_number = v;
        }
        if let Some(v) = int_value(bag, ACCESS_USER_DEFINED_ID) {
            self.user_defined_id = v;
        }
        if let Ok(v) = bag.text(ACCESS_USER_DEFINED_TEXT) {
            self.user_defined_text = v.to_string();
        }
        if let Ok(v) = bag.text(ACCESS_SERVER) {
            self.server = v.to_string();
        }
    }
}

fn int_value<T: TryFrom<i64>>(
    bag: &ParameterBag,
    key: &str,
) -> Option<T> {
    match bag.get(key) {
        Some(ParamValue::Int(v)) => T::try_from(*v).ok(),
        _ => None,
    }
}

/// `[AccessData]` policy plus the values currently stored for the SDK.
#[derive(Debug, Default)]
pub struct AccessDataStore {
    preset: bool,
    enable_set: bool,
    enable_query: bool,
    data: RwLock<AccessData>,
}

impl AccessDataStore {
    /// Reads `[AccessData]`. Unparseable numbers keep their defaults; the
    /// individual values are only preset when `PresetAccessData` is true.
    pub fn from_document(document: &dyn ConfigLookup) -> Self {
        let lookup = |key: &str| document.lookup(SECTION_ACCESS_DATA, key);
        let enabled = |key: &str| lookup(key).is_some_and(|v| v.eq_ignore_ascii_case("true"));

        let preset = enabled("PresetAccessData");
        let enable_set = enabled("EnableSetAccessData");
        let enable_query = enabled("EnableQueryAccessData");

        let mut data = AccessData::default();
        if let Some(bits) = parse(lookup(ACCESS_FLAGS)) {
            data.flags = AccessFlags::from_bits_retain(bits);
        }
        if preset {
            if let Some(v) = parse(lookup(ACCESS_PRODUCT_ITEM_REF)) {
                data.product_item_ref = v;
            }
            if let Some(v) = parse(lookup(ACCESS_BOX_MASK)) {
                data.box_mask = v;
            }
            if let Some(v) = parse(lookup(ACCESS_SERIAL_NUMBER)) {
                data.serial_number = v;
            }
            if let Some(v) = parse(lookup(ACCESS_USER_DEFINED_ID)) {
                data.user_defined_id = v;
            }
            if let Some(v) = lookup(ACCESS_USER_DEFINED_TEXT) {
                data.user_defined_text = v.to_string();
            }
            if let Some(v) = lookup(ACCESS_SERVER) {
                data.server = v.to_string();
            }
        }
        debug!(preset, enable_set, enable_query, ?data, "Access data configured");

        Self {
            preset,
            enable_set,
            enable_query,
            data: RwLock::new(data),
        }
    }

    pub fn is_preset(&self) -> bool {
        self.preset
    }

    /// Stored values for the SDK, empty unless `EnableSetAccessData` is on
    pub fn set_access_data(&self) -> ParameterBag {
        if !self.enable_set {
            return ParameterBag::new();
        }
        self.data.read().to_bag()
    }

    /// Remembers the values the SDK reports, when `EnableQueryAccessData` is on
    pub fn query_access_data(
        &self,
        values: &ParameterBag,
    ) {
        if self.enable_query {
            self.data.write().update_from_bag(values);
        }
    }

    pub fn snapshot(&self) -> AccessData {
        self.data.read().clone()
    }
}

fn parse<T: FromStr>(value: Option<&str>) -> Option<T> {
    value?.trim().parse().ok()
}

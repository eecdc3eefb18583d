//! Permission bits and composite masks.
//!
//! Single source of truth for what each bit in a required-permission mask
//! means. The constants are plain `u32` flags so masks can be stored,
//! compared and combined with ordinary bitwise operators.

use once_cell::sync::Lazy;

pub const OWNER: u32 = 1 << 0;
pub const SUDO: u32 = 1 << 1;
pub const SUPPORT: u32 = 1 << 2;
pub const GROUP_OWNER: u32 = 1 << 3;
pub const GROUP_ADMIN_ADD_ADMINS: u32 = 1 << 4;
pub const GROUP_ADMIN_CHANGE_INFO: u32 = 1 << 5;
pub const GROUP_ADMIN_BAN_USERS: u32 = 1 << 6;
pub const GROUP_ADMIN_DELETE_MESSAGES: u32 = 1 << 7;
pub const GROUP_ADMIN_PIN_MESSAGES: u32 = 1 << 8;
pub const GROUP_ADMIN_INVITE_USERS: u32 = 1 << 9;
pub const GROUP_ADMIN: u32 = 1 << 10;
pub const GROUP_MEMBER: u32 = 1 << 11;
pub const PM: u32 = 1 << 12;
pub const EVERYONE: u32 = 1 << 13;

/// Any group-admin capability: the six specific admin rights plus the
/// generic admin bit.
pub const GROUP_ADMIN_ANY: u32 = GROUP_ADMIN_ADD_ADMINS
    | GROUP_ADMIN_CHANGE_INFO
    | GROUP_ADMIN_BAN_USERS
    | GROUP_ADMIN_DELETE_MESSAGES
    | GROUP_ADMIN_PIN_MESSAGES
    | GROUP_ADMIN_INVITE_USERS
    | GROUP_ADMIN;

/// Mask applied to handlers that carry no annotation, and the default
/// global bounding mask.
pub const DEFAULT_PERMISSIONS: u32 = OWNER | SUDO;

/// Everything a non-privileged user can hold in some chat context.
pub const PUBLIC_PERMISSIONS: u32 = GROUP_OWNER | GROUP_ADMIN_ANY | GROUP_MEMBER | PM;

/// All defined bits. Masks with bits outside this range are rejected by
/// the resolver unless they carry [`EVERYONE`].
pub const ALL: u32 = (1 << 14) - 1;

/// The six specific group-admin rights, in bit order.
pub const SPECIFIC_ADMIN_RIGHTS: [u32; 6] = [
    GROUP_ADMIN_ADD_ADMINS,
    GROUP_ADMIN_CHANGE_INFO,
    GROUP_ADMIN_BAN_USERS,
    GROUP_ADMIN_DELETE_MESSAGES,
    GROUP_ADMIN_PIN_MESSAGES,
    GROUP_ADMIN_INVITE_USERS,
];

/// Name table used when rendering masks in logs and diagnostics.
pub static BITMAP: Lazy<Vec<(&'static str, u32)>> = Lazy::new(|| {
    vec![
        ("OWNER", OWNER),
        ("SUDO", SUDO),
        ("SUPPORT", SUPPORT),
        ("GROUP_OWNER", GROUP_OWNER),
        ("GROUP_ADMIN_ADD_ADMINS", GROUP_ADMIN_ADD_ADMINS),
        ("GROUP_ADMIN_CHANGE_INFO", GROUP_ADMIN_CHANGE_INFO),
        ("GROUP_ADMIN_BAN_USERS", GROUP_ADMIN_BAN_USERS),
        ("GROUP_ADMIN_DELETE_MESSAGES", GROUP_ADMIN_DELETE_MESSAGES),
        ("GROUP_ADMIN_PIN_MESSAGES", GROUP_ADMIN_PIN_MESSAGES),
        ("GROUP_ADMIN_INVITE_USERS", GROUP_ADMIN_INVITE_USERS),
        ("GROUP_ADMIN", GROUP_ADMIN),
        ("GROUP_MEMBER", GROUP_MEMBER),
        ("PM", PM),
        ("EVERYONE", EVERYONE),
    ]
});

/// Names of the bits set in `mask`, in bit order.
pub fn mask_names(mask: u32) -> Vec<&'static str> {
    BITMAP
        .iter()
        .filter(|(_, bit)| mask & bit != 0)
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_distinct() {
        let mut seen = 0u32;
        for (_, bit) in BITMAP.iter() {
            assert_eq!(seen & bit, 0, "bit {bit:#x} overlaps another");
            seen |= bit;
        }
        assert_eq!(seen, ALL);
    }

    #[test]
    fn composite_masks() {
        assert_eq!(DEFAULT_PERMISSIONS, OWNER | SUDO);
        assert_eq!(GROUP_ADMIN_ANY & GROUP_ADMIN, GROUP_ADMIN);
        for bit in SPECIFIC_ADMIN_RIGHTS {
            assert_eq!(GROUP_ADMIN_ANY & bit, bit);
        }
        assert_eq!(PUBLIC_PERMISSIONS & (OWNER | SUDO | SUPPORT | EVERYONE), 0);
        assert_eq!(ALL & EVERYONE, EVERYONE);
    }

    #[test]
    fn mask_names_renders_set_bits() {
        assert_eq!(mask_names(OWNER | PM), vec!["OWNER", "PM"]);
        assert!(mask_names(0).is_empty());
        assert_eq!(mask_names(ALL).len(), 14);
    }
}

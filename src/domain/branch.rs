//! Static catalog of company branches offered by the branch selectors.

use serde::Serialize;

/// Placeholder shown for branches missing from the catalog.
pub const UNKNOWN_BRANCH: &str = "Nomaʼlum filial";

/// Branch preselected on the employees page.
pub const DEFAULT_BRANCH_ID: i32 = 1;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Branch {
    pub id: i32,
    pub name: &'static str,
}

/// Branches in the order the selector lists them.
pub const BRANCHES: &[Branch] = &[
    Branch { id: 2, name: "Chilonzor filiali 1" },
    Branch { id: 3, name: "Yashnabod 1" },
    Branch { id: 1, name: "Uchtepa filiali 1" },
    Branch { id: 4, name: "Yunusobod filiali 1" },
    Branch { id: 5, name: "Sergeli filiali 1" },
    Branch { id: 6, name: "Sergeli filiali 2" },
    Branch { id: 7, name: "Sergeli filiali 3" },
    Branch { id: 8, name: "Sergeli filiali 4" },
    Branch { id: 9, name: "Sergeli filiali 5" },
    Branch { id: 10, name: "Sergeli filiali 6" },
    Branch { id: 11, name: "Sergeli filiali 7" },
    Branch { id: 12, name: "Sergeli filiali 8" },
    Branch { id: 13, name: "Sergeli filiali 9" },
];

/// Branches the shifts page knows about; shifts elsewhere show [`UNKNOWN_BRANCH`].
pub const SHIFT_BRANCHES: &[Branch] = &[
    Branch { id: 2, name: "Chilonzor filiali 1" },
    Branch { id: 3, name: "Yashnabod 1" },
    Branch { id: 1, name: "Uchtepa filiali 1" },
    Branch { id: 6, name: "Chilonzor filiali" },
    Branch { id: 7, name: "Mirobod filiali" },
    Branch { id: 8, name: "Yangi" },
];

/// Display name for a branch id within `catalog`, falling back to [`UNKNOWN_BRANCH`].
pub fn branch_name(catalog: &[Branch], id: i32) -> &'static str {
    catalog
        .iter()
        .find(|branch| branch.id == id)
        .map_or(UNKNOWN_BRANCH, |branch| branch.name)
}

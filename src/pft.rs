//! Plant-functional-type catalogs.
//!
//! The run uses the same four canopy PFTs regardless of taxonomy: early,
//! mid, and late successional hardwoods plus the northern pine. The two
//! catalogs differ only in naming style; the engine's numeric codes are
//! identical and fixed.

use crate::params::Taxonomy;
use serde::{Deserialize, Serialize};

/// A plant functional type: catalog name plus the engine's numeric code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pft {
    pub name: String,
    pub ed2_pft_number: u32,
}

/// Engine codes for the four canopy PFTs, in catalog order.
const PFT_NUMBERS: [u32; 4] = [9, 10, 11, 6];

/// Site-level PFT definitions fitted at the study site.
const UMBS_NAMES: [&str; 4] = [
    "umbs.early_hardwood",
    "umbs.mid_hardwood",
    "umbs.late_hardwood",
    "umbs.northern_pine",
];

/// The platform's standard temperate PFT definitions.
const STANDARD_NAMES: [&str; 4] = [
    "temperate.Early_Hardwood",
    "temperate.North_Mid_Hardwood",
    "temperate.Late_Hardwood",
    "temperate.Northern_Pine",
];

/// Select the PFT list for a taxonomy.
///
/// Pure lookup; no other run parameter affects the result, and the order
/// is fixed.
pub fn pft_list(taxonomy: Taxonomy) -> Vec<Pft> {
    let names = match taxonomy {
        Taxonomy::Umbs => UMBS_NAMES,
        Taxonomy::Standard => STANDARD_NAMES,
    };
    names
        .iter()
        .zip(PFT_NUMBERS)
        .map(|(name, number)| Pft {
            name: name.to_string(),
            ed2_pft_number: number,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_catalogs_share_the_fixed_codes() {
        for taxonomy in [Taxonomy::Umbs, Taxonomy::Standard] {
            let pfts = pft_list(taxonomy);
            assert_eq!(pfts.len(), 4);
            let numbers: Vec<u32> = pfts.iter().map(|p| p.ed2_pft_number).collect();
            assert_eq!(numbers, vec![9, 10, 11, 6]);
        }
    }

    #[test]
    fn catalogs_differ_only_in_name_style() {
        let umbs = pft_list(Taxonomy::Umbs);
        let standard = pft_list(Taxonomy::Standard);
        for (a, b) in umbs.iter().zip(&standard) {
            assert_ne!(a.name, b.name);
            assert_eq!(a.ed2_pft_number, b.ed2_pft_number);
        }
        assert!(umbs.iter().all(|p| p.name.starts_with("umbs.")));
        assert!(standard.iter().all(|p| p.name.starts_with("temperate.")));
    }
}

//! Region tree aggregator.
//!
//! Folds classified records into one [`RegionTree`] per region. Districts
//! are unique by name within a region and keep first-seen order; localities
//! are appended in input order. Input order therefore matters and must be
//! the registry's file order for reproducible output.

use std::collections::{BTreeMap, HashMap};

use tracing::{instrument, trace};

use regiontree_shared::{Classification, DistrictNode, LocalityLeaf, RegionTree};

use crate::policy;

/// Build region trees from `(classification, code)` pairs.
///
/// Records without a region, without the names their branch needs, or
/// excluded by classification are skipped silently. Regions are keyed by
/// name.
#[instrument(skip_all)]
pub fn aggregate<I>(records: I) -> BTreeMap<String, RegionTree>
where
    I: IntoIterator<Item = (Classification, String)>,
{
    let mut builders: BTreeMap<String, RegionBuilder> = BTreeMap::new();

    for (classification, code) in records {
        let Some(region) = policy::region_key(&classification) else {
            trace!(%code, "no region, dropped");
            continue;
        };

        builders
            .entry(region.to_string())
            .or_insert_with(|| RegionBuilder::new(region, &code))
            .absorb(&classification, &code);
    }

    builders
        .into_iter()
        .map(|(name, builder)| (name, builder.tree))
        .collect()
}

// ---------------------------------------------------------------------------
// Per-region fold
// ---------------------------------------------------------------------------

struct RegionBuilder {
    tree: RegionTree,
    /// District name -> index into `tree.children`.
    districts: HashMap<String, usize>,
    flattened: bool,
}

impl RegionBuilder {
    fn new(name: &str, first_code: &str) -> Self {
        Self {
            tree: RegionTree {
                code: policy::region_code(first_code),
                name: name.to_string(),
                children: Vec::new(),
            },
            districts: HashMap::new(),
            flattened: policy::is_flattened_region(name),
        }
    }

    fn absorb(&mut self, classification: &Classification, code: &str) {
        if self.flattened {
            let Some(district) = classification.district.as_deref() else {
                return;
            };
            self.upsert_district(district, code).children.clear();
            return;
        }

        let (Some(district), Some(locality)) = (
            classification.district.as_deref(),
            classification.locality.as_deref(),
        ) else {
            return;
        };

        self.upsert_district(district, code)
            .children
            .push(LocalityLeaf {
                code: policy::locality_code(code),
                name: locality.to_string(),
            });
    }

    /// Find or insert a district; an existing node takes the latest code.
    fn upsert_district(&mut self, name: &str, code: &str) -> &mut DistrictNode {
        let code = policy::district_code(code);
        let children = &mut self.tree.children;

        match self.districts.get(name).copied() {
            Some(idx) => {
                let node = &mut children[idx];
                node.code = code;
                node.name = name.to_string();
                node
            }
            None => {
                self.districts.insert(name.to_string(), children.len());
                children.push(DistrictNode {
                    code,
                    name: name.to_string(),
                    children: Vec::new(),
                });
                let last = children.len() - 1;
                &mut children[last]
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

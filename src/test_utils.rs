//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;
    use proptest::sample::Index;

    use crate::core::module::{Module, ModuleId};

    /// Generate a valid module name segment
    pub fn module_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,12}"
    }

    /// Generate a valid group (dotted namespace)
    pub fn group_name() -> impl Strategy<Value = String> {
        "[a-z]{2,6}(\\.[a-z]{2,8}){0,2}"
    }

    /// Generate an acyclic module list in discovery order
    ///
    /// Module `i` is named `m{i}` and only depends on modules with a lower
    /// index, so the list is a DAG whatever edges are picked.
    pub fn module_dag() -> impl Strategy<Value = Vec<Module>> {
        prop::collection::vec(prop::collection::vec(any::<Index>(), 0..4), 1..25).prop_map(
            |picks| {
                let ids: Vec<ModuleId> = (0..picks.len())
                    .map(|i| ModuleId::new("g", &format!("m{i}")).unwrap())
                    .collect();
                picks
                    .iter()
                    .enumerate()
                    .map(|(i, indices)| {
                        let deps = if i == 0 {
                            Vec::new()
                        } else {
                            indices.iter().map(|ix| ids[ix.index(i)].clone()).collect()
                        };
                        Module::new(ids[i].clone(), format!("m{i}"), deps)
                    })
                    .collect()
            },
        )
    }

    /// Generate a DAG together with a non-empty selection of target indices
    pub fn dag_with_targets() -> impl Strategy<Value = (Vec<Module>, Vec<usize>)> {
        module_dag().prop_flat_map(|modules| {
            let len = modules.len();
            (
                Just(modules),
                prop::collection::vec(0..len, 1..4),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::module::ModuleId;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_module_name_generator_is_valid(group in group_name(), name in module_name()) {
            prop_assert!(ModuleId::new(&group, &name).is_ok());
        }

        #[test]
        fn test_module_dag_only_points_backwards(modules in module_dag()) {
            for (i, module) in modules.iter().enumerate() {
                for dep in module.dependencies() {
                    let dep_index: usize = dep.name()[1..].parse().unwrap();
                    prop_assert!(dep_index < i);
                }
            }
        }
    }
}

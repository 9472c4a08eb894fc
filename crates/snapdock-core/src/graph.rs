//! Requirement graph arena and the OS package walker.
//!
//! Package nodes live in a flat `Vec` and refer to their requirements by
//! [`PackageId`]. The walker visits the graph depth-first and tracks the
//! current path, so a requirement cycle is reported as
//! [`Error::CyclicRequirement`](crate::Error::CyclicRequirement) instead of
//! recursing forever.

use crate::environment::{OS_PACKAGE_PLATFORM, SoftwarePackage};

/// Index of a node in a [`RequirementGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageId(usize);

#[derive(Debug, Clone)]
struct PackageNode {
    name: Option<String>,
    runtime_platform: String,
    requirements: Vec<PackageId>,
}

#[derive(Debug, Clone, Default)]
pub struct RequirementGraph {
    nodes: Vec<PackageNode>,
    roots: Vec<PackageId>,
}

impl RequirementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a nested requirement tree. Each top-level package
    /// becomes a root.
    pub fn from_requirements(requirements: &[SoftwarePackage]) -> Self {
        let mut graph = Self::new();
        for pkg in requirements {
            let id = graph.insert_tree(pkg);
            graph.roots.push(id);
        }
        graph
    }

    fn insert_tree(&mut self, pkg: &SoftwarePackage) -> PackageId {
        let id = self.add_package(pkg.name.clone(), pkg.runtime_platform.clone());
        for child in &pkg.software_requirements {
            let child_id = self.insert_tree(child);
            self.nodes[id.0].requirements.push(child_id);
        }
        id
    }

    /// Add a detached node. Use [`add_root`](Self::add_root) or
    /// [`add_requirement`](Self::add_requirement) to connect it.
    pub fn add_package(
        &mut self,
        name: Option<String>,
        runtime_platform: impl Into<String>,
    ) -> PackageId {
        let id = PackageId(self.nodes.len());
        self.nodes.push(PackageNode {
            name,
            runtime_platform: runtime_platform.into(),
            requirements: Vec::new(),
        });
        id
    }

    /// # Errors
    ///
    /// [`Error::UnknownPackage`](crate::Error::UnknownPackage) if `id` was not
    /// issued by this graph.
    pub fn add_root(&mut self, id: PackageId) -> crate::Result<()> {
        self.check(id)?;
        self.roots.push(id);
        Ok(())
    }

    /// Record that `parent` requires `child`. Edges keep insertion order.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownPackage`](crate::Error::UnknownPackage) if either id
    /// was not issued by this graph.
    pub fn add_requirement(&mut self, parent: PackageId, child: PackageId) -> crate::Result<()> {
        self.check(child)?;
        let node = self
            .nodes
            .get_mut(parent.0)
            .ok_or(crate::Error::UnknownPackage { id: parent.0 })?;
        node.requirements.push(child);
        Ok(())
    }

    fn check(&self, id: PackageId) -> crate::Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(crate::Error::UnknownPackage { id: id.0 })
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Collect the OS packages reachable from the roots through nodes of
    /// `runtime`.
    ///
    /// Nodes of another runtime, and nodes without requirements, are not
    /// expanded. A requirement tagged `deb` contributes its name (empty when
    /// unnamed); any other requirement is expanded recursively. Output keeps
    /// visit order and is not deduplicated: a package reachable along two
    /// paths appears twice.
    ///
    /// # Errors
    ///
    /// [`Error::CyclicRequirement`](crate::Error::CyclicRequirement) when a
    /// node is reached again while it is still being expanded.
    pub fn os_packages(&self, runtime: &str) -> crate::Result<Vec<String>> {
        let mut found = Vec::new();
        let mut on_path = vec![false; self.nodes.len()];
        for &root in &self.roots {
            self.collect(root, runtime, &mut on_path, &mut found)?;
        }
        Ok(found)
    }

    fn collect(
        &self,
        id: PackageId,
        runtime: &str,
        on_path: &mut [bool],
        found: &mut Vec<String>,
    ) -> crate::Result<()> {
        let node = &self.nodes[id.0];
        if node.runtime_platform != runtime || node.requirements.is_empty() {
            return Ok(());
        }
        if on_path[id.0] {
            return Err(crate::Error::CyclicRequirement {
                // arch-lint: allow(no-silent-result-drop) reason="Option, not Result: unnamed packages report an empty name"
                package: node.name.clone().unwrap_or_default(),
            });
        }

        on_path[id.0] = true;
        for &child_id in &node.requirements {
            let child = &self.nodes[child_id.0];
            if child.runtime_platform == OS_PACKAGE_PLATFORM {
                // arch-lint: allow(no-silent-result-drop) reason="Option, not Result: unnamed deb requirements contribute an empty name"
                let name = child.name.clone().unwrap_or_default();
                tracing::debug!(package = %name, parent = ?node.name, "found OS package");
                found.push(name);
            } else {
                self.collect(child_id, runtime, on_path, found)?;
            }
        }
        on_path[id.0] = false;
        Ok(())
    }
}

/// Walk a nested requirement tree and return the OS packages reachable
/// through `runtime` nodes.
pub fn os_packages(requirements: &[SoftwarePackage], runtime: &str) -> crate::Result<Vec<String>> {
    RequirementGraph::from_requirements(requirements).os_packages(runtime)
}

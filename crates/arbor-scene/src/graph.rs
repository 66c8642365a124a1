// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The object arena and the scene construction API.
//!
//! The [`SceneGraph`] is the single owner of every object. Node entries refer
//! to other objects by [`ObjectId`], so one sub-tree can be referenced from
//! several parents without shared ownership, and destruction is driven by the
//! arena alone.

use crate::drawable::{Capabilities, Drawable};
use crate::error::{SceneError, SceneResult};
use crate::handle::TransformHandle;
use crate::node::{Entry, SceneNode};
use crate::selection::ClickEvent;
use arbor_core::picking::MAX_SELECTION_ID;
use arbor_core::{LinearRgba, Mat4, MaterialId, Vec3};
use slotmap::SlotMap;
use std::cell::OnceCell;
use std::collections::HashSet;
use std::fmt;

slotmap::new_key_type! {
    /// A handle to an object stored in a [`SceneGraph`].
    pub struct ObjectId;
}

/// Identifier meaning "use the selection colour of the nearest ancestor".
pub const INHERIT_IDENTIFIER: i32 = -1;

/// Identifier meaning "never selectable"; painted black in the selection pass.
pub const NOT_SELECTABLE: i32 = 0;

type ClickHandler = Box<dyn FnMut(&ClickEvent) -> bool>;

pub(crate) enum ObjectKind {
    Node(SceneNode),
    Leaf(Box<dyn Drawable>),
}

/// An object of the scene: a node or a drawable leaf, plus the attributes
/// every object carries.
pub struct SceneObject {
    name: String,
    color: Option<LinearRgba>,
    identifier: i32,
    pub(crate) center: OnceCell<Vec3>,
    on_click: Option<ClickHandler>,
    pub(crate) kind: ObjectKind,
}

impl SceneObject {
    fn new(name: String, kind: ObjectKind) -> Self {
        Self {
            name,
            color: None,
            identifier: INHERIT_IDENTIFIER,
            center: OnceCell::new(),
            on_click: None,
            kind,
        }
    }

    /// The object's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object's own colour, if it has one.
    pub fn color(&self) -> Option<LinearRgba> {
        self.color
    }

    /// The selection identifier.
    pub fn identifier(&self) -> i32 {
        self.identifier
    }

    /// The node data, if this object is a node.
    pub fn as_node(&self) -> Option<&SceneNode> {
        match &self.kind {
            ObjectKind::Node(node) => Some(node),
            ObjectKind::Leaf(_) => None,
        }
    }

    /// The drawable, if this object is a leaf.
    pub fn as_drawable(&self) -> Option<&dyn Drawable> {
        match &self.kind {
            ObjectKind::Leaf(drawable) => Some(drawable.as_ref()),
            ObjectKind::Node(_) => None,
        }
    }
}

impl fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            ObjectKind::Node(node) => format!("Node({} entries)", node.len()),
            ObjectKind::Leaf(_) => "Leaf".to_string(),
        };
        f.debug_struct("SceneObject")
            .field("name", &self.name)
            .field("color", &self.color)
            .field("identifier", &self.identifier)
            .field("kind", &kind)
            .finish_non_exhaustive()
    }
}

/// The arena owning every scene object.
///
/// # Examples
///
/// ```
/// use arbor_core::{Mat4, Vec3};
/// use arbor_scene::{IndexedMesh, SceneGraph};
///
/// let mut graph = SceneGraph::new();
/// let root = graph.add_node("root");
/// let mesh = IndexedMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]).unwrap();
/// let leaf = graph.add_leaf("triangle", mesh);
///
/// graph.add_transform(root, Mat4::from_translation(Vec3::Y)).unwrap();
/// assert_eq!(graph.add_child(root, leaf).unwrap(), 1);
/// graph.set_identifier(leaf, 5).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: SlotMap<ObjectId, SceneObject>,
}

impl SceneGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects in the arena.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// `true` if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// `true` if `id` names a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Creates a node with no entries.
    pub fn add_node(&mut self, name: impl Into<String>) -> ObjectId {
        self.insert(SceneObject::new(name.into(), ObjectKind::Node(SceneNode::new())))
    }

    /// Creates a leaf wrapping `drawable`.
    pub fn add_leaf(&mut self, name: impl Into<String>, drawable: impl Drawable + 'static) -> ObjectId {
        self.insert(SceneObject::new(
            name.into(),
            ObjectKind::Leaf(Box::new(drawable)),
        ))
    }

    fn insert(&mut self, object: SceneObject) -> ObjectId {
        let name = object.name.clone();
        let id = self.objects.insert(object);
        log::debug!("Created scene object '{}' ({:?})", name, id);
        id
    }

    /// Looks up an object.
    pub fn object(&self, id: ObjectId) -> SceneResult<&SceneObject> {
        self.objects.get(id).ok_or(SceneError::UnknownObject(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> SceneResult<&mut SceneObject> {
        self.objects.get_mut(id).ok_or(SceneError::UnknownObject(id))
    }

    /// Looks up a node.
    pub fn node(&self, id: ObjectId) -> SceneResult<&SceneNode> {
        self.object(id)?.as_node().ok_or(SceneError::NotANode(id))
    }

    fn node_mut(&mut self, id: ObjectId) -> SceneResult<&mut SceneNode> {
        match &mut self.object_mut(id)?.kind {
            ObjectKind::Node(node) => Ok(node),
            ObjectKind::Leaf(_) => Err(SceneError::NotANode(id)),
        }
    }

    /// Resolves an `Object` entry of `parent`.
    pub(crate) fn child(&self, parent: ObjectId, child: ObjectId) -> SceneResult<&SceneObject> {
        self.objects
            .get(child)
            .ok_or(SceneError::DanglingObject { parent, child })
    }

    /// Appends an `Object` entry referencing `child` and returns its index.
    ///
    /// The same child may be referenced several times, from one node or from
    /// many. An entry that would let a node reach itself is rejected.
    pub fn add_child(&mut self, parent: ObjectId, child: ObjectId) -> SceneResult<usize> {
        self.node(parent)?;
        self.object(child)?;
        if parent == child || self.reaches(child, parent) {
            return Err(SceneError::WouldCreateCycle { parent, child });
        }
        self.node_mut(parent).map(|node| node.push(Entry::Object(child)))
    }

    /// Appends a `Transform` entry and returns its index.
    pub fn add_transform(&mut self, node: ObjectId, matrix: Mat4) -> SceneResult<usize> {
        self.node_mut(node).map(|n| n.push(Entry::Transform(matrix)))
    }

    /// Appends a `Material` entry and returns its index.
    pub fn add_material(&mut self, node: ObjectId, material: MaterialId) -> SceneResult<usize> {
        self.node_mut(node).map(|n| n.push(Entry::Material(material)))
    }

    /// Returns a handle to the transform entry at `index` of `node`.
    pub fn transform_handle(&self, node: ObjectId, index: usize) -> SceneResult<TransformHandle> {
        self.transform(TransformHandle::new(node, index))?;
        Ok(TransformHandle::new(node, index))
    }

    /// Reads the matrix behind a transform handle.
    pub fn transform(&self, handle: TransformHandle) -> SceneResult<&Mat4> {
        let node = self.node(handle.node())?;
        match node.get(handle.index()) {
            Some(Entry::Transform(matrix)) => Ok(matrix),
            Some(_) => Err(SceneError::NotATransform {
                node: handle.node(),
                index: handle.index(),
            }),
            None => Err(SceneError::EntryOutOfRange {
                node: handle.node(),
                index: handle.index(),
                len: node.len(),
            }),
        }
    }

    /// Mutable access to the matrix behind a transform handle.
    pub fn transform_mut(&mut self, handle: TransformHandle) -> SceneResult<&mut Mat4> {
        let node = self.node_mut(handle.node())?;
        let len = node.len();
        match node.get_mut(handle.index()) {
            Some(Entry::Transform(matrix)) => Ok(matrix),
            Some(_) => Err(SceneError::NotATransform {
                node: handle.node(),
                index: handle.index(),
            }),
            None => Err(SceneError::EntryOutOfRange {
                node: handle.node(),
                index: handle.index(),
                len,
            }),
        }
    }

    /// Replaces the matrix behind a transform handle.
    pub fn set_transform(&mut self, handle: TransformHandle, matrix: Mat4) -> SceneResult<()> {
        *self.transform_mut(handle)? = matrix;
        Ok(())
    }

    /// Gives the object its own colour.
    pub fn set_color(&mut self, id: ObjectId, color: LinearRgba) -> SceneResult<()> {
        self.object_mut(id)?.color = Some(color);
        Ok(())
    }

    /// `true` if the object has its own colour.
    pub fn has_color(&self, id: ObjectId) -> SceneResult<bool> {
        Ok(self.object(id)?.color.is_some())
    }

    /// The object's own colour; an error if it has none.
    pub fn color(&self, id: ObjectId) -> SceneResult<LinearRgba> {
        self.object(id)?.color.ok_or(SceneError::NoColor(id))
    }

    /// Sets the selection identifier.
    ///
    /// Accepts [`INHERIT_IDENTIFIER`], [`NOT_SELECTABLE`], or a positive
    /// identifier that fits in 24 bits.
    pub fn set_identifier(&mut self, id: ObjectId, identifier: i32) -> SceneResult<()> {
        let valid = identifier == INHERIT_IDENTIFIER
            || (NOT_SELECTABLE..=MAX_SELECTION_ID as i32).contains(&identifier);
        if !valid {
            return Err(SceneError::InvalidIdentifier(identifier));
        }
        self.object_mut(id)?.identifier = identifier;
        Ok(())
    }

    /// The selection identifier.
    pub fn identifier(&self, id: ObjectId) -> SceneResult<i32> {
        Ok(self.object(id)?.identifier)
    }

    /// The object's name.
    pub fn name(&self, id: ObjectId) -> SceneResult<&str> {
        Ok(self.object(id)?.name())
    }

    /// Overrides the object-space centre instead of computing it lazily.
    pub fn set_center(&mut self, id: ObjectId, center: Vec3) -> SceneResult<()> {
        self.object_mut(id)?.center = OnceCell::from(center);
        Ok(())
    }

    /// Registers the handler run when the object is selected by a click.
    ///
    /// The handler returns whether it consumed the click.
    pub fn set_click_handler(
        &mut self,
        id: ObjectId,
        handler: impl FnMut(&ClickEvent) -> bool + 'static,
    ) -> SceneResult<()> {
        self.object_mut(id)?.on_click = Some(Box::new(handler));
        Ok(())
    }

    /// Runs the object's click handler, or the default one, which logs the
    /// object name and reports the click as handled.
    pub fn click(&mut self, id: ObjectId, event: &ClickEvent) -> SceneResult<bool> {
        let object = self.object_mut(id)?;
        match object.on_click.as_mut() {
            Some(handler) => Ok(handler(event)),
            None => {
                log::info!("Clicked on object '{}'", object.name);
                Ok(true)
            }
        }
    }

    /// The optional passes supported anywhere below `id`.
    pub fn capabilities(&self, id: ObjectId) -> SceneResult<Capabilities> {
        match &self.object(id)?.kind {
            ObjectKind::Leaf(drawable) => Ok(drawable.capabilities()),
            ObjectKind::Node(node) => node.children().try_fold(Capabilities::NONE, |acc, child| {
                self.child(id, child)?;
                Ok(acc | self.capabilities(child)?)
            }),
        }
    }

    /// `true` if `target` is `from` or can be reached from it through
    /// `Object` entries.
    pub fn reaches(&self, from: ObjectId, target: ObjectId) -> bool {
        let mut pending = vec![from];
        let mut seen = HashSet::new();
        while let Some(id) = pending.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.objects.get(id).and_then(SceneObject::as_node) {
                pending.extend(node.children());
            }
        }
        false
    }

    /// Removes an object that no node references any more.
    ///
    /// Removing a node does not remove the objects it references; use
    /// [`retain_reachable`](Self::retain_reachable) to collect them.
    pub fn remove_object(&mut self, id: ObjectId) -> SceneResult<()> {
        self.object(id)?;
        let referrer = self.objects.iter().find_map(|(parent, object)| {
            object
                .as_node()
                .filter(|node| node.children().any(|child| child == id))
                .map(|_| parent)
        });
        if let Some(by) = referrer {
            return Err(SceneError::StillReferenced { object: id, by });
        }
        if let Some(object) = self.objects.remove(id) {
            log::debug!("Removed scene object '{}' ({:?})", object.name, id);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn remove_unchecked(&mut self, id: ObjectId) {
        self.objects.remove(id);
    }

    /// Drops every object that cannot be reached from `roots` and returns how
    /// many were removed.
    pub fn retain_reachable(&mut self, roots: &[ObjectId]) -> usize {
        let mut reachable = HashSet::new();
        let mut pending: Vec<ObjectId> = roots.to_vec();
        while let Some(id) = pending.pop() {
            if !reachable.insert(id) {
                continue;
            }
            if let Some(node) = self.objects.get(id).and_then(SceneObject::as_node) {
                pending.extend(node.children());
            }
        }

        let before = self.objects.len();
        self.objects.retain(|id, _| reachable.contains(&id));
        let removed = before - self.objects.len();
        if removed > 0 {
            log::debug!("Dropped {} unreachable scene objects", removed);
        }
        removed
    }
}

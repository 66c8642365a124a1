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

//! LIFO save/restore stacks backing [`RenderPipeline`](super::RenderPipeline)
//! implementations.

use crate::material::MaterialId;

/// A pop was issued with nothing saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("pop on an empty {0} stack")]
pub struct StackUnderflow(pub &'static str);

/// A current value plus a stack of saved copies.
///
/// # Examples
///
/// ```
/// use arbor_core::renderer::StateStack;
///
/// let mut color = StateStack::new("color", 0u8);
/// color.push();
/// color.set(7);
/// assert_eq!(*color.current(), 7);
/// color.pop().unwrap();
/// assert_eq!(*color.current(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct StateStack<T: Clone> {
    label: &'static str,
    current: T,
    saved: Vec<T>,
}

impl<T: Clone> StateStack<T> {
    /// Creates a stack with an initial current value and nothing saved.
    pub fn new(label: &'static str, initial: T) -> Self {
        Self {
            label,
            current: initial,
            saved: Vec::new(),
        }
    }

    /// The current value.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Replaces the current value.
    pub fn set(&mut self, value: T) {
        self.current = value;
    }

    /// Saves a copy of the current value.
    pub fn push(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Restores the last saved value.
    pub fn pop(&mut self) -> Result<(), StackUnderflow> {
        self.current = self.saved.pop().ok_or(StackUnderflow(self.label))?;
        Ok(())
    }

    /// Number of saved values.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// The active-material stack.
///
/// Activation is skipped when the requested material is already active, so the
/// return values tell the caller whether the backend actually has to switch.
#[derive(Debug, Clone, Default)]
pub struct MaterialStack {
    active: Option<MaterialId>,
    saved: Vec<Option<MaterialId>>,
}

impl MaterialStack {
    /// Creates a stack with no active material.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active material, if any.
    pub fn active(&self) -> Option<MaterialId> {
        self.active
    }

    /// Saves the active material.
    pub fn push(&mut self) {
        self.saved.push(self.active);
    }

    /// Activates `material`; returns `true` if it differs from the active one.
    pub fn activate(&mut self, material: MaterialId) -> bool {
        if self.active == Some(material) {
            return false;
        }
        self.active = Some(material);
        true
    }

    /// Re-activates the last saved material and drops it from the stack.
    ///
    /// Returns `true` if the active material changed.
    pub fn pop(&mut self) -> Result<bool, StackUnderflow> {
        let restored = self.saved.pop().ok_or(StackUnderflow("material"))?;
        let changed = restored != self.active;
        self.active = restored;
        Ok(changed)
    }

    /// Number of saved materials.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_state_stack_underflow_is_reported() {
        let mut s = StateStack::new("model matrix", 1);
        assert_eq!(s.pop(), Err(StackUnderflow("model matrix")));
        assert_eq!(*s.current(), 1);
    }

    #[test]
    fn test_state_stack_nested_restore() {
        let mut s = StateStack::new("color", 'a');
        s.push();
        s.set('b');
        s.push();
        s.set('c');
        assert_eq!(s.depth(), 2);
        s.pop().unwrap();
        assert_eq!(*s.current(), 'b');
        s.pop().unwrap();
        assert_eq!(*s.current(), 'a');
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn test_material_stack_switches_only_on_change() {
        let mut keys: SlotMap<MaterialId, ()> = SlotMap::with_key();
        let red = keys.insert(());
        let blue = keys.insert(());

        let mut stack = MaterialStack::new();
        assert!(stack.activate(red));
        assert!(!stack.activate(red));

        stack.push();
        assert!(stack.activate(blue));
        assert_eq!(stack.pop(), Ok(true));
        assert_eq!(stack.active(), Some(red));

        stack.push();
        assert_eq!(stack.pop(), Ok(false));
        assert_eq!(stack.pop(), Err(StackUnderflow("material")));
    }
}

//! The mixin tree: what one expansion produces.
//!
//! A tree is an ordered list of building-block references plus macros plus
//! named child slots. Order matters and duplicates are kept, because a later
//! class may override members of an earlier one. Child trees are owned by
//! exactly one slot, so the structure is a strict tree.

use std::collections::BTreeMap;
use std::fmt;

/// A reference to a shader class, with optional generic arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassRef {
    pub name: String,
    pub generic_args: Vec<String>,
}

impl ClassRef {
    pub fn new(name: impl Into<String>) -> Self {
        ClassRef {
            name: name.into(),
            generic_args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassRef {
            name: name.into(),
            generic_args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.generic_args.is_empty() {
            write!(f, "<{}>", self.generic_args.join(", "))?;
        }
        Ok(())
    }
}

/// Output of a mixin expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MixinTree {
    classes: Vec<ClassRef>,
    macros: Vec<(String, String)>,
    compositions: BTreeMap<String, MixinTree>,
    composition_arrays: BTreeMap<String, Vec<MixinTree>>,
}

impl MixinTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, name: impl Into<String>) -> &mut Self {
        self.classes.push(ClassRef::new(name));
        self
    }

    pub fn add_class_with_args<I, S>(&mut self, name: impl Into<String>, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.push(ClassRef::with_args(name, args));
        self
    }

    /// Append a `#define`. Later definitions of the same macro are kept and
    /// win when the source is generated.
    pub fn add_macro(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.macros.push((name.into(), value.into()));
        self
    }

    /// Attach `child` to the single slot `name`, returning the tree it
    /// replaces.
    pub fn set_slot(&mut self, name: impl Into<String>, child: MixinTree) -> Option<MixinTree> {
        self.compositions.insert(name.into(), child)
    }

    /// Append `child` to the array slot `name`.
    pub fn push_slot_item(&mut self, name: impl Into<String>, child: MixinTree) {
        self.composition_arrays.entry(name.into()).or_default().push(child);
    }

    pub fn slot(&self, name: &str) -> Option<&MixinTree> {
        self.compositions.get(name)
    }

    pub fn slot_array(&self, name: &str) -> Option<&[MixinTree]> {
        self.composition_arrays.get(name).map(Vec::as_slice)
    }

    /// Single slots, by name.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &MixinTree)> {
        self.compositions.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    /// Array slots, by name.
    pub fn slot_arrays(&self) -> impl Iterator<Item = (&str, &[MixinTree])> {
        self.composition_arrays
            .iter()
            .map(|(name, trees)| (name.as_str(), trees.as_slice()))
    }

    pub fn classes(&self) -> &[ClassRef] {
        &self.classes
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|class| class.name.as_str()).collect()
    }

    pub fn macros(&self) -> &[(String, String)] {
        &self.macros
    }

    /// No classes, macros or slots.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.macros.is_empty()
            && self.compositions.is_empty()
            && self.composition_arrays.is_empty()
    }

    /// Number of class references in this tree and every slot below it.
    pub fn class_count(&self) -> usize {
        self.classes.len()
            + self.compositions.values().map(MixinTree::class_count).sum::<usize>()
            + self
                .composition_arrays
                .values()
                .flatten()
                .map(MixinTree::class_count)
                .sum::<usize>()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        for class in &self.classes {
            writeln!(f, "{pad}{class}")?;
        }
        for (name, value) in &self.macros {
            writeln!(f, "{pad}#define {name} {value}")?;
        }
        for (name, child) in &self.compositions {
            child.write_slot(f, &pad, name, depth)?;
        }
        for (name, children) in &self.composition_arrays {
            for (index, child) in children.iter().enumerate() {
                child.write_slot(f, &pad, &format!("{name}[{index}]"), depth)?;
            }
        }
        Ok(())
    }

    fn write_slot(
        &self,
        f: &mut fmt::Formatter<'_>,
        pad: &str,
        label: &str,
        depth: usize,
    ) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{pad}{label} {{}}");
        }
        writeln!(f, "{pad}{label} {{")?;
        self.write_indented(f, depth + 1)?;
        writeln!(f, "{pad}}}")
    }
}

/// One line per class or macro; slots open an indented block.
///
/// ```text
/// CBase
/// #define SAMPLES 4
/// sub {
///   Base
/// }
/// ```
impl fmt::Display for MixinTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(test)]
mod tests;

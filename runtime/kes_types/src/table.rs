//! The declared-type registry.
//!
//! The compiler declares every user-defined type here once, at startup, and
//! bakes the returned [`TypeId`]s into generated code. The runtime consults
//! the table to validate constructor calls and to render debug output.

use rustc_hash::FxHashMap;

use crate::TypeId;

/// The shape a type was declared with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    /// The unit type. Exactly one, at `TypeId::UNIT`.
    Unit,
    /// Fixed-arity record; field order is significant.
    Product,
    /// Tagged sum; exactly one variant active at a time.
    Union,
}

impl TypeKind {
    /// Human-readable kind name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            TypeKind::Unit => "unit",
            TypeKind::Product => "product",
            TypeKind::Union => "union",
        }
    }
}

/// A single type declaration.
///
/// Field and variant names are kept for diagnostics and debug formatting;
/// generated code addresses fields and variants positionally.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeDecl {
    /// The built-in unit type.
    Unit,
    /// Product type with ordered, named fields.
    Product { name: String, fields: Vec<String> },
    /// Union type with ordered, named variants.
    Union { name: String, variants: Vec<String> },
}

impl TypeDecl {
    /// The declared kind.
    pub const fn kind(&self) -> TypeKind {
        match self {
            TypeDecl::Unit => TypeKind::Unit,
            TypeDecl::Product { .. } => TypeKind::Product,
            TypeDecl::Union { .. } => TypeKind::Union,
        }
    }

    /// Declared arity: field count for products, variant count for unions,
    /// zero for unit.
    pub fn arity(&self) -> usize {
        match self {
            TypeDecl::Unit => 0,
            TypeDecl::Product { fields, .. } => fields.len(),
            TypeDecl::Union { variants, .. } => variants.len(),
        }
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Unit => "unit",
            TypeDecl::Product { name, .. } | TypeDecl::Union { name, .. } => name,
        }
    }
}

/// Registry of declared types, indexed by [`TypeId`].
///
/// Ids are dense and sequential: the unit type occupies id 0, declarations
/// get `1, 2, 3, …` in call order. Re-declaring a name points the name at
/// the newer id; the older declaration stays addressable by id.
#[derive(Clone, Debug)]
pub struct TypeTable {
    decls: Vec<TypeDecl>,
    by_name: FxHashMap<String, TypeId>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// Create a table with the unit type pre-registered at `TypeId::UNIT`.
    pub fn new() -> Self {
        let mut table = Self {
            decls: Vec::new(),
            by_name: FxHashMap::default(),
        };
        table.push("unit", TypeDecl::Unit);
        table
    }

    fn push(&mut self, name: &str, decl: TypeDecl) -> TypeId {
        let id = TypeId::from_raw(u32::try_from(self.decls.len()).unwrap_or(u32::MAX));
        self.decls.push(decl);
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Declare a product type with the given ordered field names.
    ///
    /// A zero-field product is legal and distinct from unit.
    pub fn declare_product(&mut self, name: &str, fields: &[&str]) -> TypeId {
        let decl = TypeDecl::Product {
            name: name.to_owned(),
            fields: fields.iter().map(|f| (*f).to_owned()).collect(),
        };
        self.push(name, decl)
    }

    /// Declare a union type with the given ordered variant names.
    pub fn declare_union(&mut self, name: &str, variants: &[&str]) -> TypeId {
        let decl = TypeDecl::Union {
            name: name.to_owned(),
            variants: variants.iter().map(|v| (*v).to_owned()).collect(),
        };
        self.push(name, decl)
    }

    /// Look up a declared type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// The declaration behind an id, if the id was issued by this table.
    pub fn decl(&self, id: TypeId) -> Option<&TypeDecl> {
        self.decls.get(id.raw() as usize)
    }

    /// The declared kind of an id.
    pub fn kind(&self, id: TypeId) -> Option<TypeKind> {
        self.decl(id).map(TypeDecl::kind)
    }

    /// Declared arity of an id (see [`TypeDecl::arity`]).
    pub fn arity(&self, id: TypeId) -> Option<usize> {
        self.decl(id).map(TypeDecl::arity)
    }

    /// Declared name of an id.
    pub fn type_name(&self, id: TypeId) -> Option<&str> {
        self.decl(id).map(TypeDecl::name)
    }

    /// Name of field `index` of a product type.
    pub fn field_name(&self, id: TypeId, index: usize) -> Option<&str> {
        match self.decl(id)? {
            TypeDecl::Product { fields, .. } => fields.get(index).map(String::as_str),
            _ => None,
        }
    }

    /// Name of variant `index` of a union type.
    pub fn variant_name(&self, id: TypeId, index: usize) -> Option<&str> {
        match self.decl(id)? {
            TypeDecl::Union { variants, .. } => variants.get(index).map(String::as_str),
            _ => None,
        }
    }

    /// Check if an id names the unit type.
    pub fn is_unit(&self, id: TypeId) -> bool {
        matches!(self.kind(id), Some(TypeKind::Unit))
    }

    /// Check if an id names a product type.
    pub fn is_product(&self, id: TypeId) -> bool {
        matches!(self.kind(id), Some(TypeKind::Product))
    }

    /// Check if an id names a union type.
    pub fn is_union(&self, id: TypeId) -> bool {
        matches!(self.kind(id), Some(TypeKind::Union))
    }

    /// Number of declarations, the pre-registered unit included.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Never true in practice — `new()` always registers unit.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

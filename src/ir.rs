//! IR data model: the program entities predicates are evaluated against.
//!
//! The engine consumes this model read-only. Entities are owned by the caller
//! (typically a loaded program snapshot) for the duration of an analysis run;
//! predicates only ever borrow them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Access-flag bits carried by classes, methods and fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AccessFlags: u32 {
        const PUBLIC = 0x1;
        const PRIVATE = 0x2;
        const PROTECTED = 0x4;
        const STATIC = 0x8;
        const FINAL = 0x10;
        const INTERFACE = 0x200;
        const ABSTRACT = 0x400;
        const ENUM = 0x4000;
        const CONSTRUCTOR = 0x10000;
    }
}

/// A type descriptor in JVM/DEX form, e.g. `Lfoo/Bar;`, `I`, `[J`.
///
/// Primitive and array descriptors are valid type names that simply resolve
/// to no class definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    pub fn descriptor(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(descriptor: &str) -> Self {
        Self(descriptor.to_string())
    }
}

impl From<String> for TypeName {
    fn from(descriptor: String) -> Self {
        Self(descriptor)
    }
}

/// An annotation attached to a class, method or field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    anno_type: TypeName,
}

impl Annotation {
    pub fn new(anno_type: impl Into<TypeName>) -> Self {
        Self {
            anno_type: anno_type.into(),
        }
    }

    pub fn anno_type(&self) -> &TypeName {
        &self.anno_type
    }
}

/// Reference to a method that may or may not have a definition in the
/// hierarchy. Carries the raw proto descriptor, e.g. `(ILjava/lang/String;)V`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    class: TypeName,
    name: String,
    proto: String,
}

impl MethodRef {
    pub fn new(
        class: impl Into<TypeName>,
        name: impl Into<String>,
        proto: impl Into<String>,
    ) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            proto: proto.into(),
        }
    }

    pub fn class(&self) -> &TypeName {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn proto(&self) -> &str {
        &self.proto
    }
}

/// Reference to a field, resolvable or not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    class: TypeName,
    name: String,
    field_type: TypeName,
}

impl FieldRef {
    pub fn new(
        class: impl Into<TypeName>,
        name: impl Into<String>,
        field_type: impl Into<TypeName>,
    ) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    pub fn class(&self) -> &TypeName {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &TypeName {
        &self.field_type
    }
}

/// A method definition: declaring class, parameters, flags, body flag and
/// annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    class: TypeName,
    name: String,
    params: Vec<TypeName>,
    access: AccessFlags,
    has_code: bool,
    annotations: Vec<Annotation>,
}

impl MethodDef {
    pub fn new(class: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            params: Vec::new(),
            access: AccessFlags::PUBLIC,
            has_code: true,
            annotations: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<TypeName>) -> Self {
        self.params = params;
        self
    }

    pub fn with_access(mut self, access: AccessFlags) -> Self {
        self.access = access;
        self
    }

    pub fn with_code(mut self, has_code: bool) -> Self {
        self.has_code = has_code;
        self
    }

    pub fn with_annotation(mut self, anno: Annotation) -> Self {
        self.annotations.push(anno);
        self
    }

    pub fn class(&self) -> &TypeName {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[TypeName] {
        &self.params
    }

    pub fn access(&self) -> AccessFlags {
        self.access
    }

    pub fn has_code(&self) -> bool {
        self.has_code
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A field definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    class: TypeName,
    name: String,
    field_type: TypeName,
    access: AccessFlags,
    annotations: Vec<Annotation>,
}

impl FieldDef {
    pub fn new(
        class: impl Into<TypeName>,
        name: impl Into<String>,
        field_type: impl Into<TypeName>,
    ) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            field_type: field_type.into(),
            access: AccessFlags::PUBLIC,
            annotations: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: AccessFlags) -> Self {
        self.access = access;
        self
    }

    pub fn with_annotation(mut self, anno: Annotation) -> Self {
        self.annotations.push(anno);
        self
    }

    pub fn class(&self) -> &TypeName {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &TypeName {
        &self.field_type
    }

    pub fn access(&self) -> AccessFlags {
        self.access
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// A class definition: flags, hierarchy links, member collections.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    name: TypeName,
    access: AccessFlags,
    external: bool,
    super_class: Option<TypeName>,
    interfaces: Vec<TypeName>,
    vmethods: Vec<MethodDef>,
    dmethods: Vec<MethodDef>,
    ifields: Vec<FieldDef>,
    sfields: Vec<FieldDef>,
    annotations: Vec<Annotation>,
    has_class_data: bool,
}

impl ClassDef {
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn access(&self) -> AccessFlags {
        self.access
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    pub fn super_class(&self) -> Option<&TypeName> {
        self.super_class.as_ref()
    }

    pub fn interfaces(&self) -> &[TypeName] {
        &self.interfaces
    }

    /// Virtual-dispatch methods.
    pub fn vmethods(&self) -> &[MethodDef] {
        &self.vmethods
    }

    /// Direct-dispatch methods (constructors, private and static methods).
    pub fn dmethods(&self) -> &[MethodDef] {
        &self.dmethods
    }

    pub fn ifields(&self) -> &[FieldDef] {
        &self.ifields
    }

    pub fn sfields(&self) -> &[FieldDef] {
        &self.sfields
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn has_class_data(&self) -> bool {
        self.has_class_data
    }
}

/// Builder for [`ClassDef`]: chain flags and members, then `build()`.
#[derive(Debug)]
pub struct ClassDefBuilder {
    inner: ClassDef,
}

impl ClassDefBuilder {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            inner: ClassDef {
                name: name.into(),
                access: AccessFlags::PUBLIC,
                external: false,
                super_class: None,
                interfaces: Vec::new(),
                vmethods: Vec::new(),
                dmethods: Vec::new(),
                ifields: Vec::new(),
                sfields: Vec::new(),
                annotations: Vec::new(),
                has_class_data: true,
            },
        }
    }

    pub fn access(mut self, access: AccessFlags) -> Self {
        self.inner.access = access;
        self
    }

    pub fn external(mut self, external: bool) -> Self {
        self.inner.external = external;
        self
    }

    pub fn super_class(mut self, super_class: impl Into<TypeName>) -> Self {
        self.inner.super_class = Some(super_class.into());
        self
    }

    pub fn interface(mut self, interface: impl Into<TypeName>) -> Self {
        self.inner.interfaces.push(interface.into());
        self
    }

    pub fn vmethod(mut self, method: MethodDef) -> Self {
        self.inner.vmethods.push(method);
        self
    }

    pub fn dmethod(mut self, method: MethodDef) -> Self {
        self.inner.dmethods.push(method);
        self
    }

    pub fn ifield(mut self, field: FieldDef) -> Self {
        self.inner.ifields.push(field);
        self
    }

    pub fn sfield(mut self, field: FieldDef) -> Self {
        self.inner.sfields.push(field);
        self
    }

    pub fn annotation(mut self, anno: Annotation) -> Self {
        self.inner.annotations.push(anno);
        self
    }

    pub fn class_data(mut self, has_class_data: bool) -> Self {
        self.inner.has_class_data = has_class_data;
        self
    }

    pub fn build(self) -> ClassDef {
        self.inner
    }
}

/// Instruction opcodes. A representative DEX-flavored subset; opcode-family
/// membership helpers live on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Opcode {
    Nop,
    Const,
    ConstString,
    MoveResultPseudo,
    MoveResultPseudoObject,
    MoveResultPseudoWide,
    NewInstance,
    Throw,
    InvokeDirect,
    InvokeStatic,
    InvokeVirtual,
    InvokeInterface,
    InvokeSuper,
    Iget,
    IgetObject,
    IgetWide,
    Iput,
    IputObject,
    IputWide,
    Sget,
    Sput,
    Return,
    ReturnVoid,
    CheckCast,
    InstanceOf,
}

impl Opcode {
    pub fn is_invoke(self) -> bool {
        matches!(
            self,
            Opcode::InvokeDirect
                | Opcode::InvokeStatic
                | Opcode::InvokeVirtual
                | Opcode::InvokeInterface
                | Opcode::InvokeSuper
        )
    }

    pub fn is_iget(self) -> bool {
        matches!(self, Opcode::Iget | Opcode::IgetObject | Opcode::IgetWide)
    }

    pub fn is_iput(self) -> bool {
        matches!(self, Opcode::Iput | Opcode::IputObject | Opcode::IputWide)
    }

    pub fn is_move_result_pseudo(self) -> bool {
        matches!(
            self,
            Opcode::MoveResultPseudo
                | Opcode::MoveResultPseudoObject
                | Opcode::MoveResultPseudoWide
        )
    }
}

/// One IR instruction: an opcode plus whatever operands its shape carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    opcode: Opcode,
    srcs: Vec<u16>,
    method: Option<MethodRef>,
    field: Option<FieldRef>,
    type_ref: Option<TypeName>,
    string_lit: Option<String>,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            srcs: Vec::new(),
            method: None,
            field: None,
            type_ref: None,
            string_lit: None,
        }
    }

    pub fn with_srcs(mut self, srcs: Vec<u16>) -> Self {
        self.srcs = srcs;
        self
    }

    pub fn with_method(mut self, method: MethodRef) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_field(mut self, field: FieldRef) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_type(mut self, type_ref: impl Into<TypeName>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_string(mut self, string_lit: impl Into<String>) -> Self {
        self.string_lit = Some(string_lit.into());
        self
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn srcs_len(&self) -> usize {
        self.srcs.len()
    }

    pub fn srcs(&self) -> &[u16] {
        &self.srcs
    }

    pub fn has_method(&self) -> bool {
        self.method.is_some()
    }

    pub fn method(&self) -> Option<&MethodRef> {
        self.method.as_ref()
    }

    pub fn has_field(&self) -> bool {
        self.field.is_some()
    }

    pub fn field(&self) -> Option<&FieldRef> {
        self.field.as_ref()
    }

    pub fn has_type(&self) -> bool {
        self.type_ref.is_some()
    }

    pub fn type_ref(&self) -> Option<&TypeName> {
        self.type_ref.as_ref()
    }

    pub fn has_string(&self) -> bool {
        self.string_lit.is_some()
    }

    pub fn string_lit(&self) -> Option<&str> {
        self.string_lit.as_deref()
    }
}

/// Name access shared by every named entity kind.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for TypeName {
    fn name(&self) -> &str {
        self.descriptor()
    }
}

impl Named for ClassDef {
    fn name(&self) -> &str {
        self.name.descriptor()
    }
}

impl Named for MethodDef {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for FieldDef {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for MethodRef {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for FieldRef {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Annotation {
    fn name(&self) -> &str {
        self.anno_type.descriptor()
    }
}

/// Access-flag and linkage reads shared by classes, methods and fields.
///
/// Definitions carried by a hierarchy are internal by construction, so only
/// classes override `is_external` (stripped library classes may be kept as
/// external shells for hierarchy walking).
pub trait Accessible {
    fn access(&self) -> AccessFlags;

    fn is_external(&self) -> bool {
        false
    }
}

impl Accessible for ClassDef {
    fn access(&self) -> AccessFlags {
        self.access
    }

    fn is_external(&self) -> bool {
        self.external
    }
}

impl Accessible for MethodDef {
    fn access(&self) -> AccessFlags {
        self.access
    }
}

impl Accessible for FieldDef {
    fn access(&self) -> AccessFlags {
        self.access
    }
}

/// Membership in a declaring class.
pub trait Member {
    fn declaring_type(&self) -> &TypeName;
}

impl Member for MethodDef {
    fn declaring_type(&self) -> &TypeName {
        &self.class
    }
}

impl Member for FieldDef {
    fn declaring_type(&self) -> &TypeName {
        &self.class
    }
}

impl Member for MethodRef {
    fn declaring_type(&self) -> &TypeName {
        &self.class
    }
}

impl Member for FieldRef {
    fn declaring_type(&self) -> &TypeName {
        &self.class
    }
}

/// Entities carrying a value type (fields and field references).
pub trait Typed {
    fn value_type(&self) -> &TypeName;
}

impl Typed for FieldDef {
    fn value_type(&self) -> &TypeName {
        &self.field_type
    }
}

impl Typed for FieldRef {
    fn value_type(&self) -> &TypeName {
        &self.field_type
    }
}

/// Annotation access. `None` means "no concrete definition" (a bare
/// reference), which all annotation predicates treat as non-matching.
pub trait Annotated {
    fn annotations(&self) -> Option<&[Annotation]>;
}

impl Annotated for ClassDef {
    fn annotations(&self) -> Option<&[Annotation]> {
        Some(&self.annotations)
    }
}

impl Annotated for MethodDef {
    fn annotations(&self) -> Option<&[Annotation]> {
        Some(&self.annotations)
    }
}

impl Annotated for FieldDef {
    fn annotations(&self) -> Option<&[Annotation]> {
        Some(&self.annotations)
    }
}

impl Annotated for MethodRef {
    fn annotations(&self) -> Option<&[Annotation]> {
        None
    }
}

impl Annotated for FieldRef {
    fn annotations(&self) -> Option<&[Annotation]> {
        None
    }
}

/// External reachability/keep oracle. The engine only wraps these queries
/// into predicates; the analysis behind them is out of scope.
pub trait KeepRules<T: ?Sized> {
    fn can_delete(&self, t: &T) -> bool;
    fn can_rename(&self, t: &T) -> bool;
    fn has_keep(&self, t: &T) -> bool;
}

//! Shape tag definitions.
//!
//! Every node in shape bytecode starts with one tag byte. The byte values
//! are part of the wire format and must never be renumbered.

/// Shape node tags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum ShapeTag {
    U8 = 0,
    U16 = 1,
    U32 = 2,
    U64 = 3,
    I8 = 4,
    I16 = 5,
    I32 = 6,
    I64 = 7,
    F32 = 8,
    F64 = 9,
    /// `@T` - pointer to a reference-counted box.
    Box = 10,
    /// `vec<T>` - pointer to a heap vector.
    Vec = 11,
    /// Tagged union, described by the tag table.
    Tag = 12,
    /// Record with positional fields.
    Struct = 17,
    /// Closure with a boxed environment.
    BoxFn = 18,
    /// Object: vtable + box pair.
    Obj = 19,
    /// Value with a destructor.
    Res = 20,
    /// `~T` - pointer to a uniquely owned body.
    Uniq = 22,
    /// Trait object: vtable + box pair.
    Trait = 24,
    /// Closure with a uniquely owned environment.
    UniqFn = 25,
    /// Closure with a stack environment.
    StackFn = 26,
    /// Plain code pointer.
    BareFn = 27,
    /// Pointer to a type descriptor.
    Tydesc = 28,
    /// `&T` - borrowed pointer.
    Rptr = 31,
    /// `[T * n]` - inline fixed-length vector.
    FixedVec = 32,
    /// `&[T]` - data pointer + byte length.
    Slice = 33,
    /// Vector header stored inline.
    UnboxedVec = 34,
    /// Unit type.
    Nil = 35,
    Bool = 36,
    Char = 37,
}

impl ShapeTag {
    /// Convert from raw tag byte.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::U8),
            1 => Some(Self::U16),
            2 => Some(Self::U32),
            3 => Some(Self::U64),
            4 => Some(Self::I8),
            5 => Some(Self::I16),
            6 => Some(Self::I32),
            7 => Some(Self::I64),
            8 => Some(Self::F32),
            9 => Some(Self::F64),
            10 => Some(Self::Box),
            11 => Some(Self::Vec),
            12 => Some(Self::Tag),
            17 => Some(Self::Struct),
            18 => Some(Self::BoxFn),
            19 => Some(Self::Obj),
            20 => Some(Self::Res),
            22 => Some(Self::Uniq),
            24 => Some(Self::Trait),
            25 => Some(Self::UniqFn),
            26 => Some(Self::StackFn),
            27 => Some(Self::BareFn),
            28 => Some(Self::Tydesc),
            31 => Some(Self::Rptr),
            32 => Some(Self::FixedVec),
            33 => Some(Self::Slice),
            34 => Some(Self::UnboxedVec),
            35 => Some(Self::Nil),
            36 => Some(Self::Bool),
            37 => Some(Self::Char),
            _ => None,
        }
    }

    /// The primitive this tag names, if it is a scalar.
    pub fn primitive(self) -> Option<Prim> {
        match self {
            Self::Nil => Some(Prim::Nil),
            Self::Bool => Some(Prim::Bool),
            Self::Char => Some(Prim::Char),
            Self::U8 => Some(Prim::U8),
            Self::U16 => Some(Prim::U16),
            Self::U32 => Some(Prim::U32),
            Self::U64 => Some(Prim::U64),
            Self::I8 => Some(Prim::I8),
            Self::I16 => Some(Prim::I16),
            Self::I32 => Some(Prim::I32),
            Self::I64 => Some(Prim::I64),
            Self::F32 => Some(Prim::F32),
            Self::F64 => Some(Prim::F64),
            _ => None,
        }
    }

    /// Whether this tag is followed by nested shape bytes.
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            Self::Struct
                | Self::Res
                | Self::Vec
                | Self::UnboxedVec
                | Self::Slice
                | Self::FixedVec
                | Self::Box
                | Self::Uniq
                | Self::Rptr
        )
    }

    /// Whether values of this tag hold a pointer at their top level.
    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::Box
                | Self::Uniq
                | Self::Rptr
                | Self::Vec
                | Self::Slice
                | Self::BoxFn
                | Self::UniqFn
                | Self::StackFn
                | Self::BareFn
                | Self::Obj
                | Self::Trait
                | Self::Tydesc
        )
    }
}

/// Scalar kinds: the leaves of every shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Prim {
    Nil,
    Bool,
    Char,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl Prim {
    /// Size in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::Nil => 0,
            Self::Bool | Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::Char | Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    /// Required alignment in bytes.
    pub fn align(self) -> usize {
        match self {
            Self::Nil => 1,
            Self::Bool | Self::U8 | Self::I8 => std::mem::align_of::<u8>(),
            Self::U16 | Self::I16 => std::mem::align_of::<u16>(),
            Self::Char | Self::U32 | Self::I32 => std::mem::align_of::<u32>(),
            Self::F32 => std::mem::align_of::<f32>(),
            Self::U64 | Self::I64 => std::mem::align_of::<u64>(),
            Self::F64 => std::mem::align_of::<f64>(),
        }
    }

    /// Canonical short name (`u8`, `i32`, `f64`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Nil => "()",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// The tag byte encoding this primitive.
    pub fn tag(self) -> ShapeTag {
        match self {
            Self::Nil => ShapeTag::Nil,
            Self::Bool => ShapeTag::Bool,
            Self::Char => ShapeTag::Char,
            Self::U8 => ShapeTag::U8,
            Self::U16 => ShapeTag::U16,
            Self::U32 => ShapeTag::U32,
            Self::U64 => ShapeTag::U64,
            Self::I8 => ShapeTag::I8,
            Self::I16 => ShapeTag::I16,
            Self::I32 => ShapeTag::I32,
            Self::I64 => ShapeTag::I64,
            Self::F32 => ShapeTag::F32,
            Self::F64 => ShapeTag::F64,
        }
    }
}

/// Closure representations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FnKind {
    /// Code pointer only.
    Bare,
    Stack,
    Boxed,
    Unique,
}

impl FnKind {
    /// Number of pointer-sized words a value occupies.
    pub fn words(self) -> usize {
        match self {
            Self::Bare => 1,
            Self::Stack | Self::Boxed | Self::Unique => 2,
        }
    }

    pub fn tag(self) -> ShapeTag {
        match self {
            Self::Bare => ShapeTag::BareFn,
            Self::Stack => ShapeTag::StackFn,
            Self::Boxed => ShapeTag::BoxFn,
            Self::Unique => ShapeTag::UniqFn,
        }
    }
}

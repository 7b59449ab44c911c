use super::{IndexAlgorithm, IndexKind};

/// Declarative description of one model property and the column backing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name, also the column name
    pub name: String,

    /// Logical type
    pub ty: PropertyType,

    /// Concrete SQL type overriding the logical type's default, rendered
    /// verbatim
    pub data_type: Option<String>,

    /// Character length, or integer display width
    pub limit: Option<u32>,

    /// Character length when `limit` is unset
    pub length: Option<u32>,

    /// Integer display width, preferred over `limit`
    pub display: Option<u32>,

    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub unsigned: bool,

    pub charset: Option<String>,
    pub collation: Option<String>,

    /// `Some(false)` renders `NOT NULL`
    pub allow_null: Option<bool>,

    /// Alias of `allow_null`; `Some(false)` renders `NOT NULL`
    pub null: Option<bool>,

    /// Single column index named after the property
    pub index: Option<PropertyIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Text,
    Json,
    Number,
    Date,
    Boolean,
    Point,
    Enum(Vec<String>),
    Array(Box<PropertyType>),
    Custom(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertyIndex {
    pub kind: Option<IndexKind>,
    pub algorithm: Option<IndexAlgorithm>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Property {
        Property {
            name: name.into(),
            ty,
            data_type: None,
            limit: None,
            length: None,
            display: None,
            precision: None,
            scale: None,
            unsigned: false,
            charset: None,
            collation: None,
            allow_null: None,
            null: None,
            index: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Property {
        Property::new(name, PropertyType::String)
    }

    pub fn text(name: impl Into<String>) -> Property {
        Property::new(name, PropertyType::Text)
    }

    pub fn json(name: impl Into<String>) -> Property {
        Property::new(name, PropertyType::Json)
    }

    pub fn number(name: impl Into<String>) -> Property {
        Property::new(name, PropertyType::Number)
    }

    pub fn date(name: impl Into<String>) -> Property {
        Property::new(name, PropertyType::Date)
    }

    pub fn boolean(name: impl Into<String>) -> Property {
        Property::new(name, PropertyType::Boolean)
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn display(mut self, display: u32) -> Self {
        self.display = Some(display);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    pub fn allow_null(mut self, allow_null: bool) -> Self {
        self.allow_null = Some(allow_null);
        self
    }

    pub fn not_null(self) -> Self {
        self.allow_null(false)
    }

    pub fn indexed(mut self) -> Self {
        self.index = Some(PropertyIndex::default());
        self
    }

    pub fn index(mut self, index: PropertyIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Returns `true` when either nullability flag is explicitly `false`.
    ///
    /// Unset flags mean the column accepts NULL.
    pub fn is_not_null(&self) -> bool {
        self.allow_null == Some(false) || self.null == Some(false)
    }

    /// Array and JSON properties are never given a single column index.
    pub fn is_indexable(&self) -> bool {
        !matches!(self.ty, PropertyType::Array(_) | PropertyType::Json)
    }

    /// The single column index to maintain for this property, if any.
    pub fn column_index(&self) -> Option<PropertyIndex> {
        self.index.filter(|_| self.is_indexable())
    }

    /// Returns `true` for `decimal` / `numeric` number columns.
    pub fn is_fixed_point(&self) -> bool {
        self.ty == PropertyType::Number
            && self.data_type.as_deref().is_some_and(|data_type| {
                data_type.eq_ignore_ascii_case("decimal") || data_type.eq_ignore_ascii_case("numeric")
            })
    }
}

impl PropertyIndex {
    pub fn unique() -> PropertyIndex {
        PropertyIndex {
            kind: Some(IndexKind::Unique),
            algorithm: None,
        }
    }

    pub fn kind(mut self, kind: IndexKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn using(mut self, algorithm: IndexAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
}

use bson::oid::ObjectId;

/// A persistable domain type keyed by a MongoDB `_id`.
///
/// Implementors must report the same identifier that their serialized
/// document carries in `_id`; repositories rely on that agreement when
/// deciding between insert and update on save.
pub trait Entity {
    /// Identifier stored in the document's `_id` field.
    fn id(&self) -> ObjectId;
}

/// Types that can be read as a MongoDB `ObjectId`.
///
/// Lookup surfaces accept `impl ObjectIdLike` so call sites can pass an
/// owned `ObjectId` or an untrusted hex string interchangeably. A string
/// that does not parse as a valid id yields `None`, which repositories
/// treat as "no such document" rather than an error.
pub trait ObjectIdLike {
    /// Interpret `self` as an `ObjectId`, or `None` if it is malformed.
    fn to_object_id(&self) -> Option<ObjectId>;
}

impl ObjectIdLike for ObjectId {
    fn to_object_id(&self) -> Option<ObjectId> {
        Some(*self)
    }
}

impl ObjectIdLike for str {
    fn to_object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(self).ok()
    }
}

impl ObjectIdLike for String {
    fn to_object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(self).ok()
    }
}

impl<T: ObjectIdLike + ?Sized> ObjectIdLike for &T {
    fn to_object_id(&self) -> Option<ObjectId> {
        (**self).to_object_id()
    }
}

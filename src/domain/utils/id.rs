use std::fmt;
use std::marker::PhantomData;

/// Numeric identifier tagged with the kind of entity it names.
///
/// The tag keeps a `HostId` from being passed where a `RequestId` is expected, while the
/// value itself stays a plain `u32` as it appears in scenario files.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Id<T> {
    pub id: u32,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: u32) -> Self {
        Id { id, _marker: PhantomData }
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for u32 {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> From<u32> for Id<T> {
    fn from(id: u32) -> Self {
        Id::new(id)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct HostTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct RequestTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct MonitorTag;

pub type HostId = Id<HostTag>;
pub type RequestId = Id<RequestTag>;
pub type MonitorId = Id<MonitorTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_names_the_tag() {
        assert_eq!(format!("{:?}", HostId::new(3)), "HostId: 3");
        assert_eq!(format!("{:?}", RequestId::new(7)), "RequestId: 7");
        assert_eq!(HostId::new(4).to_string(), "4");
    }
}

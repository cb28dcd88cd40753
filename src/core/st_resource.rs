use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// `StResource` is how the world shares a chunk with the generation task that
/// fills it: the world keeps the strong handle, the queued task keeps a
/// [`WeakResource`]. Dropping the chunk from the world therefore invalidates any
/// generation still waiting in the queue.
///
/// # Examples
///
/// ```
/// use voxel_world::core::StResource;
///
/// let counter = StResource::new(0);
/// *counter.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
///
/// let weak = counter.downgrade();
/// assert!(weak.upgrade().is_some());
/// drop(counter);
/// assert!(weak.upgrade().is_none());
/// ```
///
/// # Panics
/// Borrowing mutably while any other borrow of the same resource is alive panics,
/// the same as `RefCell`.
#[derive(Debug)]
pub struct StResource<T> {
    pub resource: Rc<RefCell<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RefCell::new(resource)),
        }
    }

    /// Returns a guard that allows reading the contained value.
    pub fn get(&self) -> Ref<'_, T> {
        self.resource.borrow()
    }

    /// Returns a guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.resource.borrow_mut()
    }

    /// Creates a non-owning handle to the same value.
    pub fn downgrade(&self) -> WeakResource<T> {
        WeakResource {
            resource: Rc::downgrade(&self.resource),
        }
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

/// A non-owning handle to an [`StResource`].
#[derive(Debug)]
pub struct WeakResource<T> {
    resource: Weak<RefCell<T>>,
}

impl<T> WeakResource<T> {
    /// Returns a strong handle if the value is still owned somewhere.
    pub fn upgrade(&self) -> Option<StResource<T>> {
        self.resource
            .upgrade()
            .map(|resource| StResource { resource })
    }
}

impl<T> Clone for WeakResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

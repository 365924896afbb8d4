//! Parameter storage types
//!
//! Bounded key-value store for tuning parameters. Allocation-free so it
//! can live in the core crate; persisting the contents between sessions
//! is a platform concern.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter cannot be modified after registration
        const READ_ONLY = 0b00000001;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

/// Parameter metadata
#[derive(Debug, Clone)]
pub struct ParamMetadata {
    /// Parameter flags
    pub flags: ParamFlags,
}

/// Parameter store for tuning-session configuration
///
/// Stores parameters as key-value pairs with metadata. Writes mark the
/// store dirty so a caller-owned persistence layer knows when to save.
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
    dirty: bool,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
            dirty: false,
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = Self::key(name).ok()?;
        self.parameters.get(&key)
    }

    /// Set parameter value
    ///
    /// Marks the store as dirty.
    ///
    /// # Errors
    ///
    /// Fails for unregistered names, over-long names, and read-only
    /// parameters.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if !self.parameters.contains_key(&key) {
            return Err(ParameterError::UnknownParameter);
        }
        if let Some(meta) = self.metadata.get(&key) {
            if meta.flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.parameters.insert(key, value).ok();
        self.dirty = true;
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// If the parameter already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// True if no parameters are registered
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// True if a set() happened since the last `clear_dirty`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledge a completed save
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
        let mut key = String::<PARAM_NAME_LEN>::new();
        key.push_str(name)
            .map_err(|_| ParameterError::NameTooLong)?;
        Ok(key)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Функции, описанные в разделе [Handle and Descriptor Functions][1] документации Oracle.
//!
//! [1]: http://docs.oracle.com/database/121/LNOCI/oci16rel002.htm#LNOCI152

use std::os::raw::{c_int, c_void, c_uint};

use super::super::OCIError;

// По странной прихоти разработчиков оракла на разных системах имя библиотеки разное
#[cfg_attr(windows, link(name = "oci"))]
#[cfg_attr(not(windows), link(name = "clntsh"))]
extern "C" {
  /// Returns a pointer to an allocated and initialized handle.
  ///
  /// # Parameters
  /// - parenth:
  ///   An environment handle.
  /// - hndlpp:
  ///   Returns a handle.
  /// - htype:
  ///   Specifies the type of handle to be allocated.
  /// - xtramem_sz:
  ///   Specifies an amount of user memory to be allocated.
  /// - usrmempp:
  ///   Returns a pointer to the user memory of size xtramem_sz allocated by the call for the user.
  pub fn OCIHandleAlloc(parenth: *const c_void,
                        hndlpp: *mut *mut c_void, // результат
                        htype: c_uint,
                        xtramem_sz: usize,
                        usrmempp: *mut *mut c_void // результат
                       ) -> c_int;
  /// This call explicitly deallocates a handle.
  ///
  /// When a statement handle is freed, the cursor associated with the statement handle is closed, but the actual
  /// cursor closing may be deferred to the next round-trip to the server.
  pub fn OCIHandleFree(hndlp: *mut c_void,
                       htype: c_uint) -> c_int;

  /// Allocates storage to hold descriptors or LOB locators. No diagnostics are available on error.
  pub fn OCIDescriptorAlloc(parenth: *const c_void,
                            descpp: *mut *mut c_void,
                            dtype: c_uint,
                            xtramem_sz: usize,
                            usrmempp: *mut *mut c_void) -> c_int;
  /// Deallocates a previously allocated descriptor. Returns `OCI_SUCCESS` or `OCI_INVALID_HANDLE`.
  pub fn OCIDescriptorFree(descp: *mut c_void,
                           dtype: c_uint) -> c_int;
  /// Allocates an array of descriptors of the same type in one call.
  ///
  /// # Parameters
  /// - descpp:
  ///   Array of `array_size` pointers, each of them receives one descriptor.
  pub fn OCIArrayDescriptorAlloc(parenth: *const c_void,
                                 descpp: *mut *mut c_void,
                                 dtype: c_uint,
                                 array_size: c_uint,
                                 xtramem_sz: usize,
                                 usrmempp: *mut *mut c_void) -> c_int;
  /// Frees an array of descriptors allocated by `OCIArrayDescriptorAlloc()`.
  pub fn OCIArrayDescriptorFree(descp: *mut *mut c_void,
                                dtype: c_uint) -> c_int;

  /// Returns a descriptor of a parameter specified by position in the describe handle or statement handle.
  ///
  /// # Parameters
  /// - hndlp:
  ///   A statement handle or describe handle. The `OCIParamGet()` function returns a parameter descriptor for this handle.
  /// - htype:
  ///   The type of the handle passed in the hndlp parameter.
  /// - errhp:
  ///   An error handle that you can pass to `OCIErrorGet()` for diagnostic information when there is an error.
  /// - parmdpp:
  ///   A descriptor of the parameter at the position given in the `pos` parameter, of handle type `OCI_DTYPE_PARAM`.
  /// - pos:
  ///   Position number in the statement handle or describe handle.
  pub fn OCIParamGet(hndlp: *const c_void,
                     htype: c_uint,
                     errhp: *mut OCIError,
                     parmdpp: *mut *mut c_void,
                     pos: c_uint) -> c_int;
  /// Gets the value of an attribute of a handle.
  pub fn OCIAttrGet(trgthndlp: *const c_void,
                    trghndltyp: c_uint,
                    attributep: *mut c_void,
                    sizep: *mut c_uint,
                    attrtype: c_uint,
                    errhp: *mut OCIError) -> c_int;
  /// Sets the value of an attribute of a handle or a descriptor.
  pub fn OCIAttrSet(trgthndlp: *mut c_void,
                    trghndltyp: c_uint,
                    attributep: *mut c_void,
                    size: c_uint,
                    attrtype: c_uint,
                    errhp: *mut OCIError) -> c_int;
}

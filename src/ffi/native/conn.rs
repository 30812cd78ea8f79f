//! Функции, описанные в разделе [Connect, Authorize, and Initialize Functions][1] документации Oracle,
//! посвященном установке соединения с базой данных.
//!
//! [1]: http://docs.oracle.com/database/121/LNOCI/oci16rel001.htm#LNOCI151

use std::os::raw::{c_int, c_void, c_uchar, c_uint, c_ushort};

use super::super::{OCIEnv, OCIError, OCIServer, OCISession, OCISvcCtx};

/// Пользовательская функция выделения памяти, передаваемая в `OCIEnvNlsCreate()`.
pub type MallocFn = extern "C" fn(ctxp: *mut c_void, size: usize) -> *mut c_void;
/// Пользовательская функция перевыделения памяти, передаваемая в `OCIEnvNlsCreate()`.
pub type ReallocFn = extern "C" fn(ctxp: *mut c_void, memptr: *mut c_void, newsize: usize) -> *mut c_void;
/// Пользовательская функция освобождения памяти, передаваемая в `OCIEnvNlsCreate()`.
pub type FreeFn = extern "C" fn(ctxp: *mut c_void, memptr: *mut c_void);

// По странной прихоти разработчиков оракла на разных системах имя библиотеки разное
#[cfg_attr(windows, link(name = "oci"))]
#[cfg_attr(not(windows), link(name = "clntsh"))]
extern "C" {
  /// OCI ENVironment CREATE with NLS info.
  ///
  /// # Comments
  /// The charset and ncharset must be both zero or non-zero.
  /// When charset or ncharset is non-zero, the corresponding character set will
  /// be used to replace the ones specified in `NLS_LANG` or `NLS_NCHAR`.
  ///
  /// # Parameters
  /// - envhpp:
  ///   A pointer to an environment handle whose encoding setting is specified by mode.
  /// - mode:
  ///   Specifies initialization of the mode.
  /// - charset:
  ///   The client-side character set for the current environment handle. If it is 0, the `NLS_LANG`
  ///   setting is used.
  /// - ncharset:
  ///   The client-side national character set for the current environment handle. If it is `0`,
  ///   `NLS_NCHAR` setting is used.
  pub fn OCIEnvNlsCreate(envhpp: *mut *mut OCIEnv, // результат
                         mode: c_uint,
                         ctxp: *mut c_void,
                         malocfp: Option<MallocFn>,
                         ralocfp: Option<ReallocFn>,
                         mfreefp: Option<FreeFn>,
                         xtramemsz: usize,
                         usrmempp: *mut *mut c_void,
                         charset: c_ushort,
                         ncharset: c_ushort) -> c_int;

  /// Creates an access path to a data source for OCI operations.
  pub fn OCIServerAttach(srvhp: *mut OCIServer,// результат
                         errhp: *mut OCIError,
                         dblink: *const c_uchar,
                         dblink_len: c_int,
                         mode: c_uint) -> c_int;
  /// Deletes an access path to a data source for OCI operations.
  pub fn OCIServerDetach(srvhp: *mut OCIServer,
                         errhp: *mut OCIError,
                         mode: c_uint) -> c_int;
  /// Creates a user session and begins a user session for a given server.
  pub fn OCISessionBegin(svchp: *mut OCISvcCtx,
                         errhp: *mut OCIError,
                         usrhp: *mut OCISession,
                         credt: c_uint,
                         mode: c_uint) -> c_int;
  /// Terminates a user session context created by `OCISessionBegin()`.
  pub fn OCISessionEnd(svchp: *mut OCISvcCtx,
                       errhp: *mut OCIError,
                       usrhp: *mut OCISession,
                       mode: c_uint) -> c_int;

  /// Returns an error message in the buffer provided and an Oracle Database error code.
  ///
  /// # Parameters
  /// - recordno:
  ///   Indicates the status record from which the application seeks information. Starts from 1.
  /// - sqlstate:
  ///   Not supported in release 8.x or later.
  pub fn OCIErrorGet(hndlp: *mut c_void,
                     recordno: c_uint,
                     sqlstate: *mut c_uchar,
                     errcodep: *mut c_int,
                     bufp: *mut c_uchar,
                     bufsiz: c_uint,
                     htype: c_uint) -> c_int;
}

//! Функции, описанные в разделе [Miscellaneous Functions][1] документации Oracle, а также функции кеша
//! типов и преобразования `ROWID`.
//!
//! [1]: https://docs.oracle.com/database/122/LNOCI/miscellaneous-functions.htm#LNOCI167

use std::os::raw::{c_int, c_void, c_uchar, c_uint, c_ushort};

use super::super::{OCIEnv, OCIError, OCIRowid, OCISvcCtx, OCIType};

// По странной прихоти разработчиков оракла на разных системах имя библиотеки разное
#[cfg_attr(windows, link(name = "oci"))]
#[cfg_attr(not(windows), link(name = "clntsh"))]
extern "C" {
  /// Returns the 5 digit Oracle Database version number of the client library at run time.
  pub fn OCIClientVersion(major_version: *mut c_int,
                          minor_version: *mut c_int,
                          update_num: *mut c_int,
                          patch_num: *mut c_int,
                          port_update_num: *mut c_int);
  /// Returns the Oracle Database release string and the release number of the server.
  ///
  /// # Parameters
  /// - bufp:
  ///   The buffer in which the version information is returned. Must be at least 1 byte long.
  /// - hndltype:
  ///   The type of handle passed to the function.
  pub fn OCIServerRelease(hndlp: *mut c_void,
                          errhp: *mut OCIError,
                          bufp: *mut c_uchar,
                          bufsz: c_uint,
                          hndltype: c_uchar,
                          version: *mut c_uint) -> c_int;
  /// Converts a Universal `ROWID` to character extended (base 64) representation.
  ///
  /// # Parameters
  /// - outbflp:
  ///   On input, the length of the buffer. On output, the length of the `ROWID`.
  pub fn OCIRowidToChar(rowid: *mut OCIRowid,
                        outbfp: *mut c_uchar,
                        outbflp: *mut c_ushort,
                        errhp: *mut OCIError) -> c_int;
  /// Gets the most current version of an existing type by name and pins it in the object cache.
  pub fn OCITypeByName(env: *mut OCIEnv,
                       err: *mut OCIError,
                       svc: *const OCISvcCtx,
                       schema_name: *const c_uchar,
                       s_length: c_uint,
                       type_name: *const c_uchar,
                       t_length: c_uint,
                       version_name: *const c_uchar,
                       v_length: c_uint,
                       pin_duration: c_ushort,
                       get_option: c_uint,
                       tdo: *mut *mut OCIType) -> c_int;
}

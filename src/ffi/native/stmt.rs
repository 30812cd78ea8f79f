//! Функции, описанные в разделе [Statement Functions][1] документации Oracle, а также функции
//! управления транзакциями.
//!
//! [1]: https://docs.oracle.com/database/122/LNOCI/statement-functions.htm#LNOCI161

use std::os::raw::{c_int, c_void, c_uchar, c_uint, c_ushort};

use super::super::{OCIError, OCIStmt, OCISvcCtx};

// По странной прихоти разработчиков оракла на разных системах имя библиотеки разное
#[cfg_attr(windows, link(name = "oci"))]
#[cfg_attr(not(windows), link(name = "clntsh"))]
extern "C" {
  /// Prepares a SQL or PL/SQL statement for execution. The user has the option of using the statement cache, if it has been enabled.
  pub fn OCIStmtPrepare2(svchp: *mut OCISvcCtx,
                         stmthp: *mut *mut OCIStmt,
                         errhp: *mut OCIError,
                         stmttext: *const c_uchar,
                         stmt_len: c_uint,
                         key: *const c_uchar,
                         keylen: c_uint,
                         language: c_uint,
                         mode: c_uint) -> c_int;
  /// Releases the statement handle obtained by a call to `OCIStmtPrepare2()`.
  pub fn OCIStmtRelease(stmthp: *mut OCIStmt,
                        errhp: *mut OCIError,
                        key: *const c_uchar,
                        keylen: c_uint,
                        mode: c_uint) -> c_int;
  /// Associates an application request with a server.
  ///
  /// # Parameters
  /// - iters:
  ///   For non-`SELECT` statements, the number of times this statement is executed equals `iters - rowoff`.
  ///   For `SELECT` statements, if `iters` is nonzero, then defines must have been done for the statement handle.
  pub fn OCIStmtExecute(svchp: *mut OCISvcCtx,
                        stmtp: *mut OCIStmt,
                        errhp: *mut OCIError,
                        iters: c_uint,
                        rowoff: c_uint,
                        snap_in: *const c_void,
                        snap_out: *mut c_void,
                        mode: c_uint) -> c_int;
  /// Fetches a row from the (scrollable) result set.
  pub fn OCIStmtFetch2(stmtp: *mut OCIStmt,
                       errhp: *mut OCIError,
                       nrows: c_uint,
                       orientation: c_ushort,
                       fetch_offset: c_int,
                       mode: c_uint) -> c_int;

  /// Commits the transaction associated with a specified service context.
  pub fn OCITransCommit(svchp: *mut OCISvcCtx,
                        errhp: *mut OCIError,
                        flags: c_uint) -> c_int;
  /// Rolls back the current transaction.
  pub fn OCITransRollback(svchp: *mut OCISvcCtx,
                          errhp: *mut OCIError,
                          flags: c_uint) -> c_int;
}

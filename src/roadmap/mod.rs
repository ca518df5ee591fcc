//! Roadmap status lifecycle back-end.
//!
//! ## Overview
//!
//! Every organization owns an ordered set of statuses ("Open", "Planned",
//! ...). Feedback posts sit in exactly one status. Admins create, rename,
//! recolor, reorder and delete statuses; deleting a status that still holds
//! posts is a two-call protocol that moves those posts onto a replacement
//! status and removes the old one in a single transaction.
//!
//! ## Module Map
//!
//! ```text
//! ┌──────────┐   HTTP   ┌──────────────────────────────────────────────────┐
//! │  Client  │ ───────> │  server.rs  (axum Router, ServerConfig)          │
//! │ (Kanban, │ <─────── │    └─ api.rs  (route handlers, OrgContext)       │
//! │ Roadmap) │          │         │                                        │
//! └──────────┘          │         │ DbHandle::call() on the blocking pool  │
//!                       │         v                                        │
//!                       │  db.rs  (RoadmapDb: SQLite, transactions)        │
//!                       │         │                                        │
//!                       │         ├─ lifecycle.rs (keys, reorder, targets) │
//!                       │         └─ views.rs     (kanban / roadmap)       │
//!                       └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Delete Flow
//!
//! 1. `DELETE /api/statuses/{id}` with no body → `RoadmapDb::delete_status(.., None)`.
//!    Refused with `LastStatus` when it is the organization's only status.
//!    Unused statuses are deleted on the spot; used ones return
//!    `{requiresReassignment, postCount}` and nothing changes.
//! 2. The client lists `/api/statuses/{id}/reassignment-targets` and lets the
//!    user choose one.
//! 3. `DELETE /api/statuses/{id}` with `{reassignTo}` → posts are moved with a
//!    single filtered `UPDATE`, the status row is deleted and positions are
//!    compacted, all inside one SQLite transaction. Any failure rolls back.

pub mod api;
pub mod db;
pub mod lifecycle;
pub mod models;
pub mod server;
pub mod views;

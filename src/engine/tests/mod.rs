use std::sync::Arc;

use super::*;
use crate::types::{Grant, Member, Role};
use yare::parameterized;


const SITE: &str = r#"{
    "content": { "types": [
        {
            "slug": "post",
            "permissions": {
                "read": ["PUBLIC"], "create": ["EDITOR"], "update": ["EDITOR"],
                "delete": ["ADMIN"], "admin": ["ADMIN", "POST_ADMIN"]
            },
            "publishing": { "draftMode": true },
            "comments": {
                "enabled": true,
                "permissions": {
                    "read": ["PUBLIC"], "create": ["USER", "ADMIN"], "update": ["ADMIN"],
                    "delete": ["ADMIN", "COMMENTS_DELETE_ROLE"], "admin": ["ADMIN", "COMMENTS_ADMIN"]
                }
            }
        },
        {
            "slug": "event",
            "permissions": { "read": ["USER"], "create": ["EVENT_MANAGER"], "delete": ["ADMIN"] }
        },
        {
            "slug": "page",
            "permissions": { "read": ["PUBLIC"], "update": ["ADMIN"] },
            "comments": { "enabled": false, "permissions": { "read": ["PUBLIC"] } }
        }
    ]},
    "groups": { "types": [
        {
            "slug": "project",
            "publishing": { "draftMode": true },
            "permissions": {
                "read": ["PUBLIC"], "create": ["ADMIN", "USER"], "update": ["ADMIN"], "delete": ["ADMIN"]
            },
            "user": { "permissions": { "read": ["USER"], "admin": ["GROUP_MANAGER"] } },
            "contentTypes": [{
                "slug": "post",
                "comments": { "enabled": true, "permissions": { "delete": ["GROUP_ADMIN"] } },
                "permissions": { "create": ["GROUP_MEMBER", "GROUP_ADMIN"], "admin": ["GROUP_ADMIN"] }
            }]
        },
        {
            "slug": "club",
            "permissions": { "read": ["USER"] },
            "contentTypes": [
                {
                    "slug": "post",
                    "comments": { "enabled": false, "permissions": { "delete": ["GROUP_ADMIN"] } }
                },
                { "slug": "event", "permissions": { "update": ["GROUP_ADMIN"] } }
            ]
        }
    ]},
    "user": { "permissions": { "read": ["PUBLIC"], "admin": ["ADMIN"] } }
}"#;

#[derive(Clone)]
struct SharedLogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

struct SharedLogWriter(Arc<std::sync::Mutex<Vec<u8>>>);

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogBuffer {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter(Arc::clone(&self.0))
    }
}

impl std::io::Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn engine() -> PolicyEngine {
    PolicyEngine::new_from_str(SITE).expect("site config should load")
}

fn user(id: &str, roles: &[&str]) -> Actor {
    Actor::new(id, roles.iter().copied())
}

/// Group `g1` of type `project`: user1 is GROUP_ADMIN, user2 GROUP_MEMBER.
fn project_group() -> GroupSnapshot {
    GroupSnapshot::new("g1", "project")
        .with_author("founder")
        .with_member(Member::new("user1", ["GROUP_ADMIN"]))
        .with_member(Member::new("user2", ["GROUP_MEMBER"]))
}

/// Group `c1` of type `club`: user1 is GROUP_ADMIN.
fn club_group() -> GroupSnapshot {
    GroupSnapshot::new("c1", "club").with_member(Member::new("user1", ["GROUP_ADMIN"]))
}

fn in_club(author: &str) -> Entity {
    Entity::new().with_author(author).in_group("c1", Some("club"))
}

fn in_project(author: &str) -> Entity {
    Entity::new().with_author(author).in_group("g1", Some("project"))
}

fn assert_allow(decision: &Decision) {
    assert!(matches!(decision, Decision::Allow { .. }), "{decision}");
}

fn assert_deny(decision: &Decision) {
    assert!(matches!(decision, Decision::Deny { .. }), "{decision}");
}

include!("core.rs");
include!("evaluate.rs");
include!("scoped.rs");
include!("listing.rs");

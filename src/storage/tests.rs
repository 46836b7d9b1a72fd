//! Storage Module Tests
//!
//! Validates the in-memory record store and the user directory.
//!
//! ## Test Scopes
//! - **MemoryStore**: expression/node CRUD, status and result transitions,
//!   scratch-graph deletion, the operation-node scan.
//! - **Users**: bcrypt hashing and the comparison primitive.

#[cfg(test)]
mod tests {
    use crate::compiler::types::{Node, NodeStatus, Op};
    use crate::scheduler::types::{Expression, ExpressionStatus};
    use crate::storage::memory::MemoryStore;
    use crate::storage::store::RecordStore;
    use crate::storage::users::{MemoryUserDirectory, User, UserDirectory};

    fn sample_expression(id: &str, owner: &str) -> Expression {
        Expression {
            id: id.to_string(),
            owner: owner.to_string(),
            status: ExpressionStatus::Processing,
            root_node_id: format!("{}-root", id),
            result: None,
            text: "1+1".to_string(),
        }
    }

    // ============================================================
    // TEST 1: Expression records
    // ============================================================

    #[test]
    fn test_expression_insert_and_select() {
        let store = MemoryStore::new();
        store.insert_expression(sample_expression("e1", "alice")).unwrap();

        let expr = store.select_expression("e1").unwrap();
        assert_eq!(expr.owner, "alice");
        assert_eq!(expr.status, ExpressionStatus::Processing);

        assert!(store.select_expression("e2").is_none());
    }

    #[test]
    fn test_expression_status_and_result() {
        let store = MemoryStore::new();
        store.insert_expression(sample_expression("e1", "alice")).unwrap();

        store
            .set_expression_status("e1", ExpressionStatus::Error)
            .unwrap();
        assert_eq!(
            store.select_expression("e1").unwrap().status,
            ExpressionStatus::Error
        );

        store.set_expression_result("e1", 14.0).unwrap();
        let expr = store.select_expression("e1").unwrap();
        assert_eq!(expr.status, ExpressionStatus::Done);
        assert_eq!(expr.result, Some(14.0));

        assert!(store.set_expression_status("missing", ExpressionStatus::Done).is_err());
    }

    #[test]
    fn test_expressions_by_owner() {
        let store = MemoryStore::new();
        store.insert_expression(sample_expression("e1", "alice")).unwrap();
        store.insert_expression(sample_expression("e2", "alice")).unwrap();
        store.insert_expression(sample_expression("e3", "bob")).unwrap();

        assert_eq!(store.select_expressions_by_owner("alice").len(), 2);
        assert_eq!(store.select_expressions_by_owner("bob").len(), 1);
        assert!(store.select_expressions_by_owner("carol").is_empty());
    }

    // ============================================================
    // TEST 2: Node records
    // ============================================================

    #[test]
    fn test_node_lifecycle_and_deletion() {
        let store = MemoryStore::new();

        let left = Node::number("n1".to_string(), 1, "e1", 2.0);
        let right = Node::number("n2".to_string(), 2, "e1", 3.0);
        let op = Node::operation(
            "n3".to_string(),
            3,
            "e1",
            Op::Add,
            "n1".to_string(),
            "n2".to_string(),
        );
        let foreign = Node::number("n4".to_string(), 4, "e2", 9.0);

        store.insert_nodes(vec![left, right, op, foreign]).unwrap();
        assert_eq!(store.node_count(), 4);

        // Only the operation vertex shows up in the dispatch scan.
        let ops = store.operation_nodes();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].id, "n3");

        store.set_node_status("n3", NodeStatus::InProgress).unwrap();
        assert_eq!(
            store.select_node("n3").unwrap().status,
            NodeStatus::InProgress
        );

        store.set_node_result("n3", 5.0).unwrap();
        let node = store.select_node("n3").unwrap();
        assert_eq!(node.status, NodeStatus::Done);
        assert_eq!(node.result, Some(5.0));

        // Deleting one expression's graph leaves other graphs alone.
        store.delete_nodes("e1").unwrap();
        assert_eq!(store.node_count(), 1);
        assert!(store.select_node("n3").is_none());
        assert!(store.select_node("n4").is_some());
    }

    #[test]
    fn test_node_updates_on_missing_id_fail() {
        let store = MemoryStore::new();
        assert!(store.set_node_status("ghost", NodeStatus::Done).is_err());
        assert!(store.set_node_result("ghost", 1.0).is_err());
    }

    // ============================================================
    // TEST 3: User directory
    // ============================================================

    #[test]
    fn test_password_hash_and_verify() {
        let user = User::new("alice", "s3cret").unwrap();

        // The plaintext never ends up in the record.
        assert_ne!(user.password_hash, "s3cret");
        assert!(user.verify_password("s3cret"));
        assert!(!user.verify_password("wrong"));
    }

    #[test]
    fn test_user_directory_unique_names() {
        let directory = MemoryUserDirectory::new();
        directory.insert_user(User::new("alice", "pw1").unwrap()).unwrap();

        assert!(directory.select_user("alice").is_some());
        assert!(directory.select_user("bob").is_none());

        let duplicate = User::new("alice", "pw2").unwrap();
        assert!(directory.insert_user(duplicate).is_err());
    }
}

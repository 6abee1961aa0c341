//! # Case Lifecycle Flows
//!
//! End-to-end flows through the public `CaseRegistryApi`: submit a case,
//! find it in the listing, settle it exactly once, and observe the
//! dashboard tallies.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cv_registry::adapters::{
        FixedOutcomeAnalyzer, InMemoryKeyValueStore, ManualTimeSource, SimulatedFheGateway,
    };
    use cv_registry::domain::{
        CaseCategory, CaseStatus, OutcomeLabel, OwnerId, RegistryConfig,
    };
    use cv_registry::ports::{CaseDecision, CaseRegistryApi};
    use cv_registry::service::CaseRegistryService;

    type Registry =
        CaseRegistryService<InMemoryKeyValueStore, SimulatedFheGateway, FixedOutcomeAnalyzer>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn registry_at_seconds(seconds: u64) -> (Registry, Arc<ManualTimeSource>) {
        let clock = Arc::new(ManualTimeSource::new(seconds * 1000));
        let registry = CaseRegistryService::with_time_source(
            InMemoryKeyValueStore::new(),
            SimulatedFheGateway::new(),
            FixedOutcomeAnalyzer::favorable(),
            RegistryConfig::default(),
            clock.clone(),
        );
        (registry, clock)
    }

    fn owner(raw: &str) -> OwnerId {
        OwnerId::new(raw).unwrap()
    }

    fn category(raw: &str) -> CaseCategory {
        CaseCategory::new(raw).unwrap()
    }

    // =============================================================================
    // INTEGRATION TESTS: SUBMIT → LIST → SETTLE
    // =============================================================================

    /// The canonical single-case flow: pending on submission, analyzed with
    /// an outcome after review, immovable afterwards.
    #[tokio::test]
    async fn test_single_case_full_lifecycle() {
        let (registry, _) = registry_at_seconds(1000);

        let record = registry
            .submit_case(category("Contract"), b"confidential filing", owner("0xAAA"))
            .await
            .unwrap();
        assert_eq!(record.created_at, 1000);
        assert_eq!(record.status, CaseStatus::Pending);

        let listing = registry.list_cases().await.unwrap();
        assert_eq!(listing.records.len(), 1);
        assert_eq!(listing.records[0], record);

        let analyzed = registry
            .transition(&record.key, CaseDecision::Analyze, &owner("0xAAA"))
            .await
            .unwrap();
        let outcome = *analyzed.status.outcome().expect("outcome attached");
        assert_eq!(outcome.label, OutcomeLabel::Favorable);

        // A settled case can never be reviewed again, in either direction.
        let err = registry
            .transition(&record.key, CaseDecision::Reject, &owner("0xAAA"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("analyzed"));

        let listing = registry.list_cases().await.unwrap();
        assert_eq!(listing.records[0].status.outcome(), Some(&outcome));
    }

    /// Cases from different owners coexist; each owner settles only their
    /// own.
    #[tokio::test]
    async fn test_two_owners_settle_independently() {
        let (registry, clock) = registry_at_seconds(1000);

        let first = registry
            .submit_case(category("Contract"), b"aaa filing", owner("0xAAA"))
            .await
            .unwrap();
        clock.advance(1000);
        let second = registry
            .submit_case(category("Employment"), b"bbb filing", owner("0xBBB"))
            .await
            .unwrap();

        // Cross-owner review attempts bounce without effect.
        assert!(registry
            .transition(&first.key, CaseDecision::Analyze, &owner("0xBBB"))
            .await
            .is_err());
        assert!(registry
            .transition(&second.key, CaseDecision::Reject, &owner("0xAAA"))
            .await
            .is_err());

        registry
            .transition(&first.key, CaseDecision::Analyze, &owner("0xAAA"))
            .await
            .unwrap();
        registry
            .transition(&second.key, CaseDecision::Reject, &owner("0xBBB"))
            .await
            .unwrap();

        let counts = registry.list_cases().await.unwrap().status_counts();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.analyzed, 1);
        assert_eq!(counts.rejected, 1);
        assert_eq!(counts.pending, 0);
    }

    /// Listing order is a contract: newest first, ties in insertion order.
    #[tokio::test]
    async fn test_listing_order_across_many_submissions() {
        let (registry, clock) = registry_at_seconds(1000);

        let mut submitted = Vec::new();
        for n in 0..5u8 {
            let record = registry
                .submit_case(category("Corporate"), &[b'f', n], owner("0xAAA"))
                .await
                .unwrap();
            submitted.push(record);
            clock.advance(60_000);
        }

        let listing = registry.list_cases().await.unwrap();
        let listed: Vec<_> = listing.records.iter().map(|r| r.key.clone()).collect();
        let expected: Vec<_> = submitted.iter().rev().map(|r| r.key.clone()).collect();
        assert_eq!(listed, expected);

        let times: Vec<_> = listing.records.iter().map(|r| r.created_at).collect();
        assert!(times.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    /// The operational counters line up with what actually happened.
    #[tokio::test]
    async fn test_stats_snapshot_after_mixed_activity() {
        let (registry, _) = registry_at_seconds(1000);

        let a = registry
            .submit_case(category("Contract"), b"a", owner("0xAAA"))
            .await
            .unwrap();
        let b = registry
            .submit_case(category("Personal"), b"b", owner("0xAAA"))
            .await
            .unwrap();
        registry
            .submit_case(category("Criminal"), b"c", owner("0xBBB"))
            .await
            .unwrap();

        registry
            .transition(&a.key, CaseDecision::Analyze, &owner("0xAAA"))
            .await
            .unwrap();
        registry
            .transition(&b.key, CaseDecision::Reject, &owner("0xAAA"))
            .await
            .unwrap();

        let stats = registry.stats().await;
        assert_eq!(stats.cases_submitted, 3);
        assert_eq!(stats.cases_analyzed, 1);
        assert_eq!(stats.cases_rejected, 1);
        assert_eq!(stats.records_skipped, 0);
        assert_eq!(stats.index_conflicts, 0);
    }
}

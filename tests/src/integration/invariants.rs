//! # Randomized Invariant Checks
//!
//! Seeded random operation sequences, valid and invalid, against
//! `InboxService`. After every step:
//!
//! - no accounting invariant is violated
//! - total lamports are unchanged
//! - both counters only move forward
//! - rejected operations leave the status untouched

#[cfg(test)]
mod tests {
    use crate::fixtures::{init_test_logging, FUNDS};
    use anon_inbox::{Identity, InboxApi, InboxConfig, InboxError, InboxService, InboxStatus};
    use inbox_telemetry::{component_span, log_event};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ACTORS: u8 = 6;

    fn actor(rng: &mut StdRng) -> Identity {
        Identity::from_bytes([rng.gen_range(1..=ACTORS); 32])
    }

    fn content(rng: &mut StdRng) -> Vec<u8> {
        let len = match rng.gen_range(0..10) {
            0 => 0,
            1 => rng.gen_range(500..2_000),
            _ => rng.gen_range(1..64),
        };
        (0..len).map(|_| rng.gen()).collect()
    }

    fn step(service: &InboxService, rng: &mut StdRng) -> Result<&'static str, InboxError> {
        let admin = service
            .inbox()
            .map(|inbox| inbox.admin)
            .unwrap_or_else(|| actor(rng));
        // Admin operations are issued by the real admin most of the time.
        let caller = if rng.gen_bool(0.8) { admin } else { actor(rng) };

        match rng.gen_range(0..100) {
            0..=29 => service
                .send_message(actor(rng), actor(rng), content(rng))
                .map(|_| "send_message"),
            30..=39 => service
                .send_regular_message(actor(rng), actor(rng), content(rng))
                .map(|_| "send_regular_message"),
            40..=54 => service
                .send_whitelisted_message(actor(rng), actor(rng), content(rng))
                .map(|_| "send_whitelisted_message"),
            55..=66 => service
                .add_to_whitelist(caller, actor(rng))
                .map(|_| "add_to_whitelist"),
            67..=74 => service
                .remove_from_whitelist(caller, actor(rng))
                .map(|_| "remove_from_whitelist"),
            75..=84 => {
                let index = rng.gen_range(0..12);
                service
                    .reclaim_slot(caller, index)
                    .map(|_| "reclaim_slot")
            }
            85..=94 => service
                .withdraw_surplus_inbox_balance(caller)
                .map(|_| "withdraw_surplus_inbox_balance"),
            95..=97 => service
                .change_admin(caller, actor(rng))
                .map(|_| "change_admin"),
            _ => service.initialize(actor(rng)).map(|_| "initialize"),
        }
    }

    fn run(seed: u64, steps: usize, config: InboxConfig) -> InboxService {
        init_test_logging();
        let _span = component_span!("random_run", component = "tests", seed, steps).entered();

        let service = InboxService::new(config);
        for byte in 1..=ACTORS {
            service
                .credit_wallet(Identity::from_bytes([byte; 32]), FUNDS)
                .unwrap();
        }
        service.initialize(Identity::from_bytes([1; 32])).unwrap();
        let total = service.total_lamports();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut previous: InboxStatus = service.status();

        for i in 0..steps {
            let outcome = step(&service, &mut rng);
            let status = service.status();

            let violations = service.check_invariants();
            assert!(
                violations.is_empty(),
                "seed {seed} step {i}: {outcome:?} violated {violations:?}"
            );
            assert_eq!(service.total_lamports(), total, "seed {seed} step {i}");
            assert!(status.next_free_slot >= previous.next_free_slot);
            assert!(status.next_whitelisted_slot >= previous.next_whitelisted_slot);
            assert!(status.next_whitelisted_slot <= status.next_free_slot);
            if outcome.is_err() {
                assert_eq!(status, previous, "seed {seed} step {i}: {outcome:?}");
            }
            previous = status;
        }

        log_event!(
            debug,
            "tests",
            "Random run finished",
            seed,
            accepted = service.stats().requests_accepted
        );
        service
    }

    #[test]
    fn test_random_sequences_preserve_invariants() {
        for seed in 0..16 {
            run(seed, 400, InboxConfig::default());
        }
    }

    #[test]
    fn test_random_sequences_with_tight_limits() {
        let config = InboxConfig {
            max_content_len: 256,
            ..InboxConfig::default().with_max_slots(3)
        };
        for seed in 100..108 {
            let service = run(seed, 300, config.clone());
            assert!(service.status().next_free_slot <= 3);
        }
    }

    #[test]
    fn test_random_runs_are_reproducible() {
        let a = run(42, 200, InboxConfig::default());
        let b = run(42, 200, InboxConfig::default());
        assert_eq!(a.status(), b.status());
        assert_eq!(a.events(), b.events());
    }

    #[test]
    fn test_random_runs_do_real_work() {
        let service = run(7, 500, InboxConfig::default());
        let stats = service.stats();
        assert!(stats.requests_accepted > 0);
        assert!(stats.requests_rejected > 0);
        assert!(stats.paid_messages > 0);
    }
}

//! # Integration Test Flows
//!
//! Signed requests from real ed25519 wallets through `RequestHandler` into
//! `InboxService`.
//!
//! ## Scenarios
//!
//! 1. **Initialize**: first caller becomes admin, counters zero
//! 2. **Paid send**: a stranger pays for slot 0
//! 3. **Whitelisted reuse**: a member overwrites slot 0 for free
//! 4. **No slot**: member blocked once the counters meet
//! 5. **Realloc**: member pays only the capacity growth
//! 6. **Reclaim + withdraw**: admin recovers the surplus

#[cfg(test)]
mod tests {
    use crate::fixtures::{signed_inbox, SignedHandler, TestWallet, FUNDS};
    use anon_inbox::{
        slot_address, InboxApi, InboxConfig, InboxError, InboxEvent, InboxRequest, InboxResponse,
        SendPath, SlotTransition,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const INBOX_FLOOR: u64 = 1_280_640;
    const HELLO_RESERVE: u64 = 1_280_640;
    const BYTE: u64 = 6_960;

    struct Actors {
        admin: TestWallet,
        payer: TestWallet,
        member: TestWallet,
        recipient: TestWallet,
    }

    fn actors() -> Actors {
        Actors {
            admin: TestWallet::from_seed(1),
            payer: TestWallet::from_seed(2),
            member: TestWallet::from_seed(3),
            recipient: TestWallet::from_seed(4),
        }
    }

    fn setup(actors: &mut Actors) -> SignedHandler {
        let handler = signed_inbox(
            InboxConfig::default(),
            &[&actors.admin, &actors.payer, &actors.member],
        )
        .unwrap();
        let init = actors.admin.sign(InboxRequest::Initialize).unwrap();
        handler.handle(init).unwrap();
        handler
    }

    fn send(
        handler: &SignedHandler,
        wallet: &mut TestWallet,
        to: &TestWallet,
        text: &[u8],
    ) -> Result<InboxResponse, InboxError> {
        let request = wallet
            .sign(InboxRequest::SendMessage {
                recipient: to.identity(),
                content: text.to_vec(),
            })
            .unwrap();
        handler.handle(request)
    }

    fn whitelist(handler: &SignedHandler, admin: &mut TestWallet, who: &TestWallet) {
        let request = admin
            .sign(InboxRequest::AddToWhitelist {
                identity: who.identity(),
            })
            .unwrap();
        handler.handle(request).unwrap();
    }

    fn sent(response: InboxResponse) -> anon_inbox::SendReceipt {
        match response {
            InboxResponse::Sent(receipt) => receipt,
            other => panic!("expected Sent, got {other:?}"),
        }
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_initialize_makes_caller_admin() {
        let mut actors = actors();
        let handler = setup(&mut actors);
        let inbox = handler.inbox().inbox().unwrap();

        assert_eq!(inbox.admin, actors.admin.identity());
        assert_eq!(inbox.next_free_slot, 0);
        assert_eq!(inbox.next_whitelisted_slot, 0);
        assert_eq!(
            handler.inbox().wallet_balance(&actors.admin.identity()),
            FUNDS - INBOX_FLOOR
        );

        let again = actors.payer.sign(InboxRequest::Initialize).unwrap();
        assert_eq!(handler.handle(again), Err(InboxError::AlreadyInitialized));
    }

    #[test]
    fn test_stranger_pays_for_new_slot() {
        let mut actors = actors();
        let handler = setup(&mut actors);

        let receipt = sent(
            send(&handler, &mut actors.payer, &actors.recipient, b"Hello World!").unwrap(),
        );

        assert_eq!(receipt.index, 0);
        assert_eq!(receipt.path, SendPath::Paying);
        assert_eq!(receipt.charged, HELLO_RESERVE);
        assert_eq!(receipt.slot_address, slot_address(0));

        let service = handler.inbox();
        assert_eq!(service.status().next_free_slot, 1);
        let slot = service.slot(0).unwrap();
        assert_eq!(slot.recipient, actors.recipient.identity());
        assert_eq!(slot.content, b"Hello World!");
        assert_eq!(
            service.wallet_balance(&actors.payer.identity()),
            FUNDS - HELLO_RESERVE
        );
    }

    #[test]
    fn test_member_reuses_paid_slot_for_free() {
        let mut actors = actors();
        let handler = setup(&mut actors);
        let second_recipient = TestWallet::from_seed(5);

        send(&handler, &mut actors.payer, &actors.recipient, b"Hello World!").unwrap();
        whitelist(&handler, &mut actors.admin, &actors.member);
        let service = handler.inbox();
        let free_before = service.free_balance();
        let payer_before = service.wallet_balance(&actors.payer.identity());
        let member_before = service.wallet_balance(&actors.member.identity());

        let receipt = sent(send(&handler, &mut actors.member, &second_recipient, b"Hi!").unwrap());

        assert_eq!(receipt.index, 0);
        assert_eq!(receipt.path, SendPath::Whitelisted);
        assert_eq!(receipt.charged, 0);
        assert!(service.free_balance() > free_before);
        assert_eq!(service.free_balance() - free_before, 9 * BYTE);
        assert_eq!(service.wallet_balance(&actors.payer.identity()), payer_before);
        assert_eq!(service.wallet_balance(&actors.member.identity()), member_before);

        let status = service.status();
        assert_eq!(status.next_whitelisted_slot, 1);
        assert_eq!(status.next_free_slot, 1);
        assert_eq!(service.slot(0).unwrap().recipient, second_recipient.identity());
    }

    #[test]
    fn test_member_blocked_when_counters_meet() {
        let mut actors = actors();
        let handler = setup(&mut actors);
        whitelist(&handler, &mut actors.admin, &actors.member);

        assert_eq!(
            send(&handler, &mut actors.member, &actors.recipient, b"Hi!"),
            Err(InboxError::NoSlotAvailable { next_whitelisted: 0 })
        );

        send(&handler, &mut actors.payer, &actors.recipient, b"paid").unwrap();
        send(&handler, &mut actors.member, &actors.recipient, b"free").unwrap();
        assert_eq!(
            send(&handler, &mut actors.member, &actors.recipient, b"again"),
            Err(InboxError::NoSlotAvailable { next_whitelisted: 1 })
        );
    }

    #[test]
    fn test_member_pays_capacity_growth() {
        let mut actors = actors();
        let handler = setup(&mut actors);
        send(&handler, &mut actors.payer, &actors.recipient, b"a").unwrap();
        whitelist(&handler, &mut actors.admin, &actors.member);
        let service = handler.inbox();
        let before = service.wallet_balance(&actors.member.identity());

        let long = vec![b'z'; 201];
        let receipt = sent(send(&handler, &mut actors.member, &actors.recipient, &long).unwrap());

        assert_eq!(receipt.transition, SlotTransition::OverwriteGrow);
        assert_eq!(receipt.charged, 200 * BYTE);
        assert_eq!(
            service.wallet_balance(&actors.member.identity()),
            before - 200 * BYTE
        );
        let slot = service.slot(0).unwrap();
        assert_eq!(slot.capacity, 201);
        assert_eq!(slot.content, long);
    }

    #[test]
    fn test_reclaim_then_withdraw_surplus() {
        let mut actors = actors();
        let handler = setup(&mut actors);
        send(&handler, &mut actors.payer, &actors.recipient, b"Hello World!").unwrap();
        whitelist(&handler, &mut actors.admin, &actors.member);
        send(&handler, &mut actors.member, &actors.recipient, b"Hi!").unwrap();
        let service = handler.inbox();

        let reclaim = actors
            .admin
            .sign(InboxRequest::ReclaimSlot { index: 0 })
            .unwrap();
        let InboxResponse::Reclaimed(receipt) = handler.handle(reclaim).unwrap() else {
            panic!("expected Reclaimed");
        };
        assert!(service.slot(0).is_none());
        assert_eq!(service.free_balance(), 9 * BYTE + receipt.released);

        let held_before = service.status().held_balance;
        let admin_before = service.wallet_balance(&actors.admin.identity());
        let withdraw = actors
            .admin
            .sign(InboxRequest::WithdrawSurplusInboxBalance)
            .unwrap();
        let InboxResponse::Withdrawn { amount } = handler.handle(withdraw).unwrap() else {
            panic!("expected Withdrawn");
        };

        let status = service.status();
        assert!(status.held_balance < held_before);
        assert_eq!(status.held_balance, INBOX_FLOOR);
        assert!(status.initialized);
        assert_eq!(
            service.wallet_balance(&actors.admin.identity()),
            admin_before + amount
        );
    }

    // =============================================================================
    // AUTHENTICATION
    // =============================================================================

    #[test]
    fn test_forged_signer_rejected() {
        let mut actors = actors();
        let handler = setup(&mut actors);

        let mut forged = actors.payer.sign(InboxRequest::Initialize).unwrap();
        forged.signer = actors.admin.identity();

        assert_eq!(
            handler.handle(forged),
            Err(InboxError::Unauthenticated(actors.admin.identity()))
        );
    }

    #[test]
    fn test_tampered_request_rejected() {
        let mut actors = actors();
        let handler = setup(&mut actors);

        let mut request = actors
            .payer
            .sign(InboxRequest::SendMessage {
                recipient: actors.recipient.identity(),
                content: b"original".to_vec(),
            })
            .unwrap();
        request.request = InboxRequest::SendMessage {
            recipient: actors.payer.identity(),
            content: b"tampered".to_vec(),
        };

        assert!(matches!(
            handler.handle(request),
            Err(InboxError::Unauthenticated(_))
        ));
        assert_eq!(handler.inbox().status().next_free_slot, 0);
    }

    #[test]
    fn test_replayed_wire_bytes_rejected() {
        let mut actors = actors();
        let handler = setup(&mut actors);

        let bytes = actors
            .payer
            .sign(InboxRequest::SendMessage {
                recipient: actors.recipient.identity(),
                content: b"once".to_vec(),
            })
            .unwrap()
            .to_bytes()
            .unwrap();

        assert!(handler.handle_bytes(&bytes).is_ok());
        assert!(matches!(
            handler.handle_bytes(&bytes),
            Err(InboxError::ReplayedRequest { .. })
        ));
        assert_eq!(handler.inbox().status().next_free_slot, 1);
    }

    #[test]
    fn test_non_admin_cannot_curate() {
        let mut actors = actors();
        let handler = setup(&mut actors);

        let request = actors
            .payer
            .sign(InboxRequest::AddToWhitelist {
                identity: actors.payer.identity(),
            })
            .unwrap();
        assert_eq!(
            handler.handle(request),
            Err(InboxError::NotAdmin {
                caller: actors.payer.identity()
            })
        );
        assert!(!handler.inbox().is_whitelisted(&actors.payer.identity()));
    }

    #[test]
    fn test_admin_handover() {
        let mut actors = actors();
        let handler = setup(&mut actors);

        let handover = actors
            .admin
            .sign(InboxRequest::ChangeAdmin {
                new_admin: actors.payer.identity(),
            })
            .unwrap();
        handler.handle(handover).unwrap();

        whitelist(&handler, &mut actors.payer, &actors.member);
        assert!(handler.inbox().is_whitelisted(&actors.member.identity()));

        let stale = actors
            .admin
            .sign(InboxRequest::WithdrawSurplusInboxBalance)
            .unwrap();
        assert!(matches!(
            handler.handle(stale),
            Err(InboxError::NotAdmin { .. })
        ));
    }

    // =============================================================================
    // EVENTS
    // =============================================================================

    #[test]
    fn test_event_log_traces_full_flow() {
        let mut actors = actors();
        let handler = setup(&mut actors);
        send(&handler, &mut actors.payer, &actors.recipient, b"Hello World!").unwrap();
        whitelist(&handler, &mut actors.admin, &actors.member);
        send(&handler, &mut actors.member, &actors.recipient, b"Hi!").unwrap();

        let events = handler.inbox().drain_events();
        let names: Vec<_> = events.iter().map(InboxEvent::name).collect();
        assert_eq!(
            names,
            vec![
                "inbox_initialized",
                "message_sent",
                "whitelist_added",
                "message_sent"
            ]
        );
        assert!(matches!(
            events[3],
            InboxEvent::MessageSent {
                path: SendPath::Whitelisted,
                charged: 0,
                ..
            }
        ));
        assert!(handler.inbox().events().is_empty());
    }
}

use notify::{assemble, NotifyTables, DEFAULT_ROUTING};
use proptest::prelude::*;

fn tables() -> NotifyTables {
    NotifyTables::with_default_routing()
        .token("start_trend", "tok-start")
        .token("weakening_trend", "tok-weak")
        .user("default", "Desk", "111")
        .user("user1", "Analyst", "222")
}

fn strategy_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(DEFAULT_ROUTING.iter().map(|(s, _)| s.to_string()).collect::<Vec<_>>()),
        "[a-z_]{0,12}",
    ]
}

fn user_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("default".to_string()),
        Just("user1".to_string()),
        "[a-z0-9_]{0,8}",
    ]
}

proptest! {
    /// Arbitrary strategy and user lists never panic, and the output only
    /// ever names routed strategies.
    #[test]
    fn output_is_bounded_by_inputs(
        strategies in prop::collection::vec(strategy_name(), 0..20),
        users in prop::collection::vec(user_id(), 0..6),
    ) {
        let t = tables();
        let out = assemble(&t, &strategies, &users);

        prop_assert!(out.len() <= strategies.len());
        for (name, bundle) in out.iter() {
            prop_assert!(strategies.iter().any(|s| s == name));
            prop_assert!(t.channel_for(name).is_some());
            prop_assert!(bundle.chat_ids.len() <= users.len());
        }
        for s in &strategies {
            prop_assert_eq!(out.contains(s), t.channel_for(s).is_some());
        }
    }

    /// Every bundle carries one chat id per known requested user, in order.
    #[test]
    fn recipients_match_known_users(users in prop::collection::vec(user_id(), 0..6)) {
        let t = tables();
        let expected: Vec<String> = users
            .iter()
            .filter_map(|u| t.chat_id_for(u).map(str::to_string))
            .collect();

        let out = assemble(&t, &["breakout_bar", "reversal_bar"], &users);
        prop_assert_eq!(out.len(), 2);
        for (_, bundle) in out.iter() {
            prop_assert_eq!(&bundle.chat_ids, &expected);
        }
    }
}

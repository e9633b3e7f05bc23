use super::{addr, leaf, leaf_and_switch_node, switch_peer, uplinked_node};
use crate::config::{ConfigEmitter, ConfigFragment, PortInit, render_config};
use crate::error::SwitchError;
use crate::topo::{HostBinding, LinkTarget, SwitchId, SwitchNode};

const BASE: u16 = 10000;

fn parse_mac_table(config: &str) -> Vec<u16> {
    let line = config
        .lines()
        .find(|line| line.starts_with("uint16_t mac2port["))
        .expect("mac2port line");
    let body = line
        .split_once('{')
        .and_then(|(_, rest)| rest.split_once('}'))
        .map(|(body, _)| body)
        .expect("array literal");
    body.split(',')
        .map(|v| v.trim().parse().expect("u16 entry"))
        .collect()
}

#[test]
fn leaf_and_switch_downlinks_render_expected_config() {
    let node = leaf_and_switch_node();
    let emitter = ConfigEmitter::new(&node, BASE);

    assert_eq!(emitter.emit_port_count(), ConfigFragment::PortCount(2));
    assert_eq!(
        emitter.emit_downlink_init(0).expect("downlink 0"),
        PortInit::LocalChannel { port_index: 0 }
    );
    assert_eq!(
        emitter.emit_downlink_init(1).expect("downlink 1"),
        PortInit::ServerSocket {
            port_index: 1,
            local_port: 10001
        }
    );

    let expected = "\
// THIS FILE IS MACHINE GENERATED. DO NOT EDIT.
#ifdef NUMCLIENTSCONFIG
#define NUMPORTS 2
#endif
#ifdef PORTSETUPCONFIG
ports[0] = new ShmemPort(0);
ports[1] = new SocketServerPort(1, 10001);
#endif
#ifdef MACPORTSCONFIG
uint16_t mac2port[4] {0, 1, 0, 1};
#endif
";
    assert_eq!(emitter.emit_full_config().expect("emit config"), expected);
}

#[test]
fn uplink_targets_peer_server_port_for_own_position() {
    let node = uplinked_node();
    let emitter = ConfigEmitter::new(&node, BASE);

    let init = emitter.emit_uplink_init(0).expect("uplink init");
    assert_eq!(
        init,
        PortInit::ClientSocket {
            port_index: 2,
            remote_address: addr("10.0.0.5"),
            remote_port: 10002,
        }
    );
    assert_eq!(
        init.to_string(),
        r#"new SocketClientPort(2, "10.0.0.5", 10002);"#
    );
}

#[test]
fn port_count_is_downlinks_plus_uplinks() {
    for downlinks in 0..5 {
        let mut node = SwitchNode::new(SwitchId(1));
        node.downlinks = (0..downlinks).map(leaf).collect();
        node.switch_table = vec![0];
        let emitter = ConfigEmitter::new(&node, BASE);
        assert_eq!(emitter.emit_port_count(), ConfigFragment::PortCount(downlinks));

        let mut with_uplink = uplinked_node();
        with_uplink.downlinks = (0..downlinks).map(leaf).collect();
        let emitter = ConfigEmitter::new(&with_uplink, BASE);
        assert_eq!(
            emitter.emit_port_count(),
            ConfigFragment::PortCount(downlinks + 1)
        );
    }
}

#[test]
fn port_assignment_keeps_downlink_order_and_puts_uplink_last() {
    let mut node = uplinked_node();
    node.downlinks = vec![
        switch_peer(20, vec![], HostBinding::Unbound),
        leaf(4),
        switch_peer(21, vec![], HostBinding::Unbound),
        leaf(5),
    ];
    let ports = ConfigEmitter::new(&node, BASE)
        .port_assignment()
        .expect("ports");

    assert_eq!(ports.len(), 5);
    for (idx, port) in ports.iter().enumerate() {
        assert_eq!(port.port_index(), idx);
    }
    assert!(matches!(ports[0], PortInit::ServerSocket { local_port: 10000, .. }));
    assert!(matches!(ports[1], PortInit::LocalChannel { .. }));
    assert!(matches!(ports[2], PortInit::ServerSocket { local_port: 10002, .. }));
    assert!(matches!(ports[3], PortInit::LocalChannel { .. }));
    assert!(matches!(ports[4], PortInit::ClientSocket { port_index: 4, .. }));
}

#[test]
fn mac_table_literal_parses_back_to_switch_table() {
    let mut node = uplinked_node();
    node.switch_table = vec![3, 0, 65535, 1, 2, 2, 7];
    let emitter = ConfigEmitter::new(&node, BASE);

    let fragment = emitter.emit_mac_table();
    let text = render_config(std::slice::from_ref(&fragment));
    assert!(text.starts_with("#ifdef MACPORTSCONFIG\n"));
    assert!(text.contains("uint16_t mac2port[7] "));
    assert_eq!(parse_mac_table(&text), node.switch_table);

    let full = emitter.emit_full_config().expect("emit config");
    assert_eq!(parse_mac_table(&full), node.switch_table);
}

#[test]
fn full_config_is_deterministic() {
    let node = uplinked_node();
    let emitter = ConfigEmitter::new(&node, BASE);
    let a = emitter.emit_full_config().expect("emit config");
    let b = emitter.emit_full_config().expect("emit config");
    assert_eq!(a, b);

    let again = ConfigEmitter::new(&node.clone(), BASE)
        .emit_full_config()
        .expect("emit config");
    assert_eq!(a, again);
}

#[test]
fn fragments_are_in_fixed_order() {
    let node = uplinked_node();
    let fragments = ConfigEmitter::new(&node, BASE).fragments().expect("fragments");
    assert_eq!(fragments.len(), 4);
    assert_eq!(fragments[0], ConfigFragment::Header);
    assert!(matches!(fragments[1], ConfigFragment::PortCount(3)));
    assert!(matches!(&fragments[2], ConfigFragment::PortSetup(ports) if ports.len() == 3));
    assert!(matches!(&fragments[3], ConfigFragment::MacTable(t) if t.len() == 4));
}

#[test]
fn base_port_is_per_emitter() {
    let node = leaf_and_switch_node();
    let a = ConfigEmitter::new(&node, 10000)
        .emit_downlink_init(1)
        .expect("downlink");
    let b = ConfigEmitter::new(&node, 20000)
        .emit_downlink_init(1)
        .expect("downlink");
    assert_eq!(a.to_string(), "new SocketServerPort(1, 10001);");
    assert_eq!(b.to_string(), "new SocketServerPort(1, 20001);");
}

#[test]
fn second_uplink_is_unsupported() {
    let node = uplinked_node();
    let emitter = ConfigEmitter::new(&node, BASE);
    for idx in [1, 2, 10] {
        let err = emitter.emit_uplink_init(idx).unwrap_err();
        assert!(
            matches!(err, SwitchError::UnsupportedTopology { uplink_index, .. } if uplink_index == idx),
            "unexpected error: {err}"
        );
    }

    let mut two_uplinks = uplinked_node();
    let extra = two_uplinks.uplinks[0].clone();
    two_uplinks.uplinks.push(extra);
    let err = ConfigEmitter::new(&two_uplinks, BASE)
        .emit_full_config()
        .unwrap_err();
    assert!(matches!(err, SwitchError::UnsupportedTopology { uplink_index: 1, .. }));
}

#[test]
fn uplink_on_unbound_node_fails() {
    let mut node = uplinked_node();
    node.host = HostBinding::Unbound;
    let err = ConfigEmitter::new(&node, BASE)
        .emit_uplink_init(0)
        .unwrap_err();
    assert!(matches!(err, SwitchError::UnboundHost { switch_id } if switch_id == SwitchId(3)));
}

#[test]
fn uplink_peer_without_address_fails() {
    let mut node = uplinked_node();
    node.uplinks = vec![switch_peer(
        9,
        vec![LinkTarget::Switch(SwitchId(3))],
        HostBinding::Unbound,
    )];
    let err = ConfigEmitter::new(&node, BASE)
        .emit_uplink_init(0)
        .unwrap_err();
    assert!(matches!(err, SwitchError::UnboundHost { switch_id } if switch_id == SwitchId(9)));
}

#[test]
fn uplink_peer_that_does_not_list_node_fails_resolution() {
    let mut node = uplinked_node();
    node.uplinks = vec![switch_peer(
        9,
        vec![LinkTarget::Switch(SwitchId(1))],
        HostBinding::bound(addr("10.0.0.5")),
    )];
    let err = ConfigEmitter::new(&node, BASE)
        .emit_uplink_init(0)
        .unwrap_err();
    assert!(matches!(
        err,
        SwitchError::Resolution { switch_id, peer: LinkTarget::Switch(SwitchId(9)) } if switch_id == SwitchId(3)
    ));
}

#[test]
fn uplink_index_zero_without_uplink_is_missing() {
    let node = leaf_and_switch_node();
    let err = ConfigEmitter::new(&node, BASE)
        .emit_uplink_init(0)
        .unwrap_err();
    assert!(matches!(err, SwitchError::MissingUplink { uplink_index: 0, .. }));
}

#[test]
fn server_port_past_u16_range_is_rejected() {
    let node = leaf_and_switch_node();
    let emitter = ConfigEmitter::new(&node, u16::MAX);

    assert_eq!(
        emitter.emit_downlink_init(0).expect("local channel needs no port"),
        PortInit::LocalChannel { port_index: 0 }
    );
    let err = emitter.emit_downlink_init(1).unwrap_err();
    assert!(
        matches!(err, SwitchError::PortOutOfRange { switch_id, port: 65536 } if switch_id == SwitchId(7)),
        "unexpected error: {err}"
    );
    assert!(matches!(
        emitter.emit_full_config(),
        Err(SwitchError::PortOutOfRange { .. })
    ));

    let edge = ConfigEmitter::new(&node, u16::MAX - 1)
        .emit_downlink_init(1)
        .expect("last valid port");
    assert_eq!(edge.to_string(), "new SocketServerPort(1, 65535);");
}

#[test]
fn uplink_remote_port_past_u16_range_is_rejected() {
    let node = uplinked_node();
    let err = ConfigEmitter::new(&node, u16::MAX - 1)
        .emit_uplink_init(0)
        .unwrap_err();
    assert!(matches!(err, SwitchError::PortOutOfRange { port: 65536, .. }));
}

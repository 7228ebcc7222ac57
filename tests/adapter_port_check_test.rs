use std::net::TcpListener;

use tui_shooter::adapter::server::check_tcp_listen_available;

#[test]
fn adapter_port_check_fails_when_port_in_use() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral port");
    let port = listener.local_addr().unwrap().port();

    let err = check_tcp_listen_available("127.0.0.1", port).expect_err("expected addr in use");
    assert_eq!(err.kind(), std::io::ErrorKind::AddrInUse);
}

#[test]
fn adapter_port_check_releases_the_port() {
    let probe = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let port = probe.local_addr().unwrap().port();
    drop(probe);

    check_tcp_listen_available("127.0.0.1", port).expect("port should be free");
    // The probe itself must not keep the port.
    TcpListener::bind(("127.0.0.1", port)).expect("probe leaked the port");
}

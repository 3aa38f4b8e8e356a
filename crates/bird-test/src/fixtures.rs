//! Canned daemon replies, byte for byte as BIRD writes them to the socket.
//!
//! Consecutive lines with the same code use the short continuation form
//! (a single leading space instead of the code).

/// Welcome banner sent on connect.
pub const WELCOME: &str = "0001 BIRD 1.6.8 ready.\n";

/// Reply to a `show protocols all <name>` that matched nothing.
pub const NO_PROTOCOLS_MATCH: &str = "8003 No protocols match\n";

/// Reply to a command the daemon could not parse.
pub const PARSE_ERROR: &str = "9001 Parse error\n";

/// `show status` reply.
pub const SHOW_STATUS: &str = "\
1000-BIRD 1.6.8
1011-Router ID is 10.0.0.1
 Current server time is 2024-03-01 12:00:00
 Last reboot on 2024-02-28 08:15:02
 Last reconfiguration on 2024-02-28 08:15:02
0013 Daemon is up and running
";

/// `show protocols all` with a device, a kernel and two BGP protocols.
pub const SHOW_PROTOCOLS_ALL: &str = "\
2002-name     proto    table    state  since       info
1002-device1  Device   master   up     08:15:02
1006-  Preference:     240
   Input filter:   ACCEPT
   Output filter:  REJECT
   Routes:         0 imported, 0 exported, 0 preferred
   Route change stats:     received   rejected   filtered    ignored   accepted
     Import updates:              0          0          0          0          0
     Import withdraws:            0          0        ---          0          0
     Export updates:              0          0          0        ---          0
     Export withdraws:            0        ---        ---        ---          0
\x20
1002-kernel1  Kernel   master   up     08:15:02
1006-  Preference:     10
   Input filter:   ACCEPT
   Output filter:  ACCEPT
   Routes:         3 imported, 12 exported, 3 preferred
   Route change stats:     received   rejected   filtered    ignored   accepted
     Import updates:              3          0          0          0          3
     Import withdraws:            0          0        ---          0          0
     Export updates:             14          0          2        ---         12
     Export withdraws:            1        ---        ---        ---          1
\x20
1002-bgp_uplink BGP      master   up     08:15:09    Established
1006-  Description:    Uplink to transit
   Preference:     100
   Input filter:   import_transit
   Output filter:  export_transit
   Import limit:   1000
     Action:       restart
   Routes:         12 imported, 1 filtered, 3 exported, 10 preferred
   Route change stats:     received   rejected   filtered    ignored   accepted
     Import updates:             15          0          1          2         12
     Import withdraws:            2          0        ---          0          2
     Export updates:             20          5          0        ---         15
     Export withdraws:            0        ---        ---        ---          0
   BGP state:          Established
     Neighbor address: 192.0.2.2
     Neighbor AS:      64512
     Neighbor ID:      192.0.2.2
     Neighbor caps:    refresh enhanced-refresh restart-aware AS4
     Session:          external AS4
     Source address:   192.0.2.1
     Hold timer:       152/180
     Keepalive timer:  33/60
\x20
1002-bgp_backup BGP      master   start  08:15:09    Connect       Socket: Connection refused
1006-  Preference:     100
   Input filter:   ACCEPT
   Output filter:  ACCEPT
   Routes:         0 imported, 0 exported, 0 preferred
   BGP state:          Connect
     Neighbor address: 198.51.100.7
     Neighbor AS:      64513
     Last error:       Socket: Connection refused
\x20
0000 \n";

/// `show protocols all bgp_v2` as printed by BIRD 2 (capitalized heading,
/// per-channel statistics).
pub const SHOW_PROTOCOL_BIRD2: &str = "\
2002-Name       Proto      Table      State  Since         Info
1002-bgp_v2     BGP        ---        up     09:12:44      Established
1006-  BGP state:          Established
     Neighbor address: 2001:db8::2
     Neighbor AS:      65002
     Neighbor ID:      10.0.0.2
     Session:          external AS4
     Source address:   2001:db8::1
   Channel ipv6
     State:          UP
     Table:          master6
     Preference:     100
     Input filter:   ACCEPT
     Output filter:  ACCEPT
     Receive limit:  500
       Action:       block
     Export limit:   200
       Action:       warn
     Routes:         7 imported, 4 exported, 6 preferred
     Route change stats:     received   rejected   filtered    ignored   accepted
       Import updates:              9          0          0          2          7
       Import withdraws:            1          0        ---          0          1
       Export updates:             11          7          0        ---          4
       Export withdraws:            0        ---        ---        ---          0
\x20
0000 \n";

/// `show protocols all` on a daemon without protocols.
pub const SHOW_PROTOCOLS_EMPTY: &str = "\
2002-name     proto    table    state  since       info
0000 \n";

/// Splits `reply` into its raw lines (delimiters removed).
pub fn raw_lines(reply: &str) -> Vec<&str> {
    reply.lines().collect()
}

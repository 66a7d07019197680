//! Static capability document for the cluster manager
//!
//! Pacemaker discovers a fence agent's parameters and supported actions
//! by running it with the `metadata` action and reading this document
//! from stdout.

pub const DOCUMENT: &str = r#"<resource-agent name="palisade" shortdesc="IPMI fencing agent">
  <longdesc>
    palisade is an I/O fencing agent for cluster nodes whose BMC is reachable over IPMI-on-LAN. It drives the support utility ipmitool (https://github.com/ipmitool/ipmitool). A status or monitor action with no node name queries every node in the node list. WARNING! Like other IPMI agents, it may report success before the node is fully powered off.
  </longdesc>
  <parameters>
    <parameter name="action" required="1">
      <getopt mixed="[action]"/>
      <content type="string"/>
      <shortdesc lang="en">
        Fencing action
      </shortdesc>
    </parameter>
    <parameter name="user" required="0">
      <getopt mixed="-U, --user=[username]"/>
      <content type="string" default="USERID"/>
      <shortdesc lang="en">
        Login name
      </shortdesc>
    </parameter>
    <parameter name="pass" required="0">
      <getopt mixed="-P, --pass=[password]"/>
      <content type="string" default="PASSW0RD"/>
      <shortdesc lang="en">
        Login password or passphrase
      </shortdesc>
    </parameter>
    <parameter name="port" required="0">
      <getopt mixed="-p, --port=[port]"/>
      <content type="string" default="623"/>
      <shortdesc lang="en">
        Port number of the BMC connection
      </shortdesc>
    </parameter>
    <parameter name="nodelist" required="0">
      <getopt mixed="-n, --nodelist=[nodefile]"/>
      <content type="string" default="/etc/pacemaker/bmclist.conf"/>
      <shortdesc lang="en">
        BMC node list file
      </shortdesc>
    </parameter>
  </parameters>
  <actions>
    <action name="on"/>
    <action name="off"/>
    <action name="reboot"/>
    <action name="soft"/>
    <action name="status" timeout="30s"/>
    <action name="monitor" timeout="30s"/>
    <action name="metadata"/>
    <action name="start"/>
    <action name="stop"/>
  </actions>
</resource-agent>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_names_the_agent() {
        assert!(DOCUMENT.starts_with("<resource-agent name=\"palisade\""));
        assert!(DOCUMENT.trim_end().ends_with("</resource-agent>"));
    }

    #[test]
    fn test_document_lists_all_parameters() {
        for parameter in ["action", "user", "pass", "port", "nodelist"] {
            assert!(
                DOCUMENT.contains(&format!("<parameter name=\"{parameter}\"")),
                "missing parameter {parameter}"
            );
        }
    }

    #[test]
    fn test_document_lists_all_actions() {
        for action in [
            "on", "off", "reboot", "soft", "status", "monitor", "metadata", "start", "stop",
        ] {
            assert!(
                DOCUMENT.contains(&format!("<action name=\"{action}\"")),
                "missing action {action}"
            );
        }
    }

    #[test]
    fn test_document_defaults_match_request_layer() {
        assert!(DOCUMENT.contains("default=\"USERID\""));
        assert!(DOCUMENT.contains("default=\"PASSW0RD\""));
        assert!(DOCUMENT.contains("default=\"623\""));
        assert!(DOCUMENT.contains(&format!("default=\"{}\"", crate::request::DEFAULT_NODELIST)));
    }
}

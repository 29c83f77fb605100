//! First-run content: the default admin password and starter question bank.

use crate::model::{AdminConfig, Question, QuizData};

/// Password written to `admin.json` on first run.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub fn default_admin_config() -> AdminConfig {
    AdminConfig {
        password: DEFAULT_ADMIN_PASSWORD.to_string(),
    }
}

/// Starter question bank covering `CompTIA/PenTest+` and `Cisco/CCNA`.
pub fn default_quiz_data() -> QuizData {
    let q = |id: &str, question: &str, options: [&str; 4], answer: usize, category: &str, module: &str| {
        Question {
            id: id.to_string(),
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
            category: category.to_string(),
            module: module.to_string(),
        }
    };

    QuizData {
        questions: vec![
            q(
                "pt1",
                "What is the primary purpose of a penetration test?",
                [
                    "To fix all vulnerabilities",
                    "To identify and exploit vulnerabilities in a controlled manner",
                    "To install security software",
                    "To train employees",
                ],
                1,
                "CompTIA",
                "PenTest+",
            ),
            q(
                "pt2",
                "Which phase comes first in a penetration testing methodology?",
                [
                    "Exploitation",
                    "Reporting",
                    "Planning and Reconnaissance",
                    "Post-Exploitation",
                ],
                2,
                "CompTIA",
                "PenTest+",
            ),
            q(
                "pt3",
                "What tool is commonly used for network scanning?",
                ["Wireshark", "Nmap", "Metasploit", "John the Ripper"],
                1,
                "CompTIA",
                "PenTest+",
            ),
            q(
                "pt4",
                "What does OSINT stand for?",
                [
                    "Operating System Intelligence",
                    "Open Source Intelligence",
                    "Online Security Internet",
                    "Organized Security Interface",
                ],
                1,
                "CompTIA",
                "PenTest+",
            ),
            q(
                "pt5",
                "Which of the following is a social engineering attack?",
                ["SQL Injection", "Buffer Overflow", "Phishing", "XSS Attack"],
                2,
                "CompTIA",
                "PenTest+",
            ),
            q(
                "ccna1",
                "What is the default administrative distance of OSPF?",
                ["90", "100", "110", "120"],
                2,
                "Cisco",
                "CCNA",
            ),
            q(
                "ccna2",
                "Which layer of the OSI model does a switch operate at?",
                [
                    "Layer 1 - Physical",
                    "Layer 2 - Data Link",
                    "Layer 3 - Network",
                    "Layer 4 - Transport",
                ],
                1,
                "Cisco",
                "CCNA",
            ),
            q(
                "ccna3",
                "What is the maximum number of usable hosts in a /26 subnet?",
                ["30", "62", "126", "254"],
                1,
                "Cisco",
                "CCNA",
            ),
            q(
                "ccna4",
                "Which protocol is used by ping?",
                ["TCP", "UDP", "ICMP", "ARP"],
                2,
                "Cisco",
                "CCNA",
            ),
            q(
                "ccna5",
                "What does STP stand for?",
                [
                    "Simple Transfer Protocol",
                    "Spanning Tree Protocol",
                    "Secure Transmission Protocol",
                    "Switch Transport Protocol",
                ],
                1,
                "Cisco",
                "CCNA",
            ),
        ],
    }
}

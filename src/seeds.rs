//! Built-in question bank.
//!
//! Guarantees the game is playable without an external bank file: six
//! foundation, seven associate and five professional questions.

use crate::domain::{AnswerOption, CorrectAnswer, Question};

fn q(
  id: &str,
  difficulty: u8,
  domain: &str,
  text: &str,
  options: &[&str],
  correct: &[&str],
  explanation: &str,
) -> Question {
  let options = options
    .iter()
    .zip('a'..='f')
    .map(|(text, id)| AnswerOption {
      id: id.to_string(),
      label: id.to_ascii_uppercase().to_string(),
      text: (*text).into(),
    })
    .collect();
  let correct = match correct {
    [one] => CorrectAnswer::Single((*one).into()),
    many => CorrectAnswer::Multi(many.iter().map(|s| (*s).into()).collect()),
  };
  Question {
    id: id.into(),
    text: text.into(),
    options,
    correct,
    difficulty,
    domain: domain.into(),
    explanation: explanation.into(),
  }
}

const DESIGN: &str = "Designing and Planning";
const PROVISIONING: &str = "Managing and Provisioning";
const IMPLEMENTATION: &str = "Managing Implementation";
const SECURITY: &str = "Security and Compliance";
const RELIABILITY: &str = "Ensuring Reliability";

pub fn seed_questions() -> Vec<Question> {
  vec![
    // Foundation
    q(
      "q1", 1, DESIGN,
      "A startup is moving a monolithic e-commerce application with spiky sales-event traffic to Google Cloud. Leadership wants automatic scaling with minimal operations. Which compute services fit? (Choose 2)",
      &[
        "Managed instance groups with startup scripts",
        "Google Kubernetes Engine (Autopilot)",
        "Google Dataproc",
        "Google App Engine Standard",
      ],
      &["b", "d"],
      "GKE Autopilot and App Engine Standard are fully managed and autoscale. MIGs still need OS management; Dataproc is for data processing.",
    ),
    q(
      "q2", 1, DESIGN,
      "Each country of a multinational has its own projects, but management wants integrated networking while keeping projects independent. How should networking be organized?",
      &["Peered VPC", "Cloud Interconnect", "Shared VPC", "Cloud VPN and Cloud Router"],
      &["c"],
      "Shared VPC centralizes the network in a host project while service projects stay independent.",
    ),
    q(
      "q3", 1, DESIGN,
      "A multi-petabyte dataset must be available around the clock and the analysts only know SQL. Where should the data live?",
      &[
        "Load it into BigQuery",
        "Insert it into Cloud SQL",
        "Put flat files into Cloud Storage",
        "Stream it into Datastore",
      ],
      &["a"],
      "BigQuery is a serverless, petabyte-scale warehouse with standard SQL. Cloud SQL does not scale to petabytes.",
    ),
    q(
      "q4", 1, DESIGN,
      "You run a single Cloud SQL instance and need high availability. What should you do?",
      &[
        "Create a read replica in another region",
        "Create a failover replica in the same region, different zone",
        "Enable automatic backups and binary logging",
        "Migrate to Cloud Spanner",
      ],
      &["b"],
      "Cloud SQL HA replicates synchronously to a standby in another zone of the same region.",
    ),
    q(
      "q5", 1, DESIGN,
      "The company has a monthly cloud budget and wants automatic notification when spend approaches it. What should you do?",
      &[
        "Link a credit card with a monthly limit",
        "Create budget alerts at 50%, 90% and 100%",
        "Set a daily budget in App Engine settings",
        "Export billing data to BigQuery",
      ],
      &["b"],
      "Budget alerts warn at configured thresholds by email or Pub/Sub.",
    ),
    q(
      "q6", 1, DESIGN,
      "Reports read a set of objects about once a month. Availability matters but cost should be minimal. Which storage class fits best?",
      &["Standard", "Nearline", "Coldline", "Archive"],
      &["b"],
      "Nearline targets data read roughly monthly; Coldline is for quarterly access.",
    ),
    // Associate
    q(
      "q7", 2, DESIGN,
      "A mobile game backend exposes REST APIs and needs near-continuous availability, global low latency and fast scaling. How should it be built?",
      &[
        "Layer 4 TCP load balancer, MIGs in one zone",
        "Layer 7 HTTPS load balancer, MIGs in one zone",
        "Layer 7 HTTPS load balancer, MIGs in multiple regions",
        "Layer 4 TCP load balancer, MIGs across zones",
      ],
      &["c"],
      "The global HTTPS load balancer routes users to the nearest healthy backend; multi-region MIGs remove single points of failure.",
    ),
    q(
      "q8", 2, IMPLEMENTATION,
      "Which three practices should you recommend when migrating a J2EE application? (Choose 3)",
      &[
        "Port the code to App Engine",
        "Add Dataflow for real-time metrics",
        "Instrument with Cloud Operations monitoring",
        "Adopt an infrastructure-as-code framework",
        "Run CI/CD with automated tests in staging",
        "Move from MySQL to a NoSQL store",
      ],
      &["c", "d", "e"],
      "Monitoring, infrastructure as code and CI/CD apply to any migration.",
    ),
    q(
      "q9", 2, PROVISIONING,
      "A latency-sensitive service must scale from 8 to 160 instances quickly. What minimizes instance startup time?",
      &[
        "Install packages with OS Config after boot",
        "Build a custom image with every package baked in",
        "Use Terraform with startup scripts",
        "Configure instances with Puppet after creation",
      ],
      &["b"],
      "A prebaked image removes installation time from boot.",
    ),
    q(
      "q10", 3, PROVISIONING,
      "You need to change a GKE cluster's machine type from n1-standard-1 to n1-standard-4. What should you do?",
      &[
        "Create a new node pool and migrate workloads",
        "gcloud container clusters resize",
        "gcloud container clusters update",
        "gcloud container clusters migrate",
      ],
      &["a"],
      "Existing node pools cannot change machine type; create a new pool and move the workloads.",
    ),
    q(
      "q11", 3, PROVISIONING,
      "Videos should move to Coldline after 90 days and be deleted after a year. How do you set that up?",
      &[
        "A Cloud Function that moves and deletes objects",
        "Object versioning with lifecycle rules",
        "Lifecycle rules: transition at 90 days, delete at 365",
        "Daily Cloud Scheduler jobs",
      ],
      &["c"],
      "Declarative lifecycle rules handle age-based transitions natively.",
    ),
    q(
      "q12", 3, SECURITY,
      "A service behind a global HTTPS load balancer needs protection from DDoS attacks. What should be used?",
      &["Identity-Aware Proxy", "VPC firewall rules", "Cloud Armor", "IAM policies"],
      &["c"],
      "Cloud Armor provides DDoS protection and WAF rules at the edge.",
    ),
    q(
      "q13", 3, DESIGN,
      "A stateless microservice processes Pub/Sub tasks and must burst to 1000 instances. Which compute option is most cost-effective?",
      &["Google Kubernetes Engine", "Cloud Run", "Compute Engine", "App Engine Flexible"],
      &["b"],
      "Cloud Run scales to zero and bursts quickly for stateless containers.",
    ),
    // Professional
    q(
      "q14", 4, SECURITY,
      "Workloads on GKE need secure, standards-based access to Google Cloud APIs. What do you recommend?",
      &["API keys", "Exported service account keys", "Workload Identity", "Workload Identity Federation"],
      &["c"],
      "Workload Identity lets GKE pods act as service accounts without exported keys.",
    ),
    q(
      "q15", 4, IMPLEMENTATION,
      "Containers should be built and deployed automatically when code lands on main. Which combination is recommended?",
      &[
        "Source Repositories, Cloud Build, Artifact Registry, Cloud Deploy",
        "GitHub, Jenkins on Compute Engine, Docker Hub, kubectl",
        "Source Repositories, Cloud Composer, Artifact Registry, Cloud Run",
        "Bitbucket, Cloud Functions, Cloud Storage, App Engine",
      ],
      &["a"],
      "Cloud Build produces images, Artifact Registry stores them and Cloud Deploy manages releases.",
    ),
    q(
      "q16", 5, RELIABILITY,
      "An SRE team targets 99.9% availability. Which statement correctly relates SLI, SLO and error budget?",
      &[
        "The SLI measures latency; the SLO is the contract",
        "The SLI is the metric, the SLO the target, the error budget 100% minus the SLO",
        "The SLA is internal; the SLO is customer-facing",
        "The error budget is the maximum uptime",
      ],
      &["b"],
      "The SLI is what you measure, the SLO is the goal, and the error budget is the tolerated shortfall.",
    ),
    q(
      "q17", 5, SECURITY,
      "Which two actions are required for HIPAA compliance on Google Cloud? (Choose 2)",
      &[
        "Use only services on the HIPAA-covered product list",
        "Execute a Business Associate Agreement",
        "Use only public IP addresses",
        "Store all data in a single region",
      ],
      &["a", "b"],
      "Not every service is covered, and a BAA is required to handle PHI.",
    ),
    q(
      "q18", 5, SECURITY,
      "A project may only call APIs from North America and must not exfiltrate data to external buckets. What should you use?",
      &["VPC firewall rules", "VPC Service Controls", "Cloud Armor", "IAM Conditions"],
      &["b"],
      "A VPC Service Controls perimeter restricts API access and data egress.",
    ),
  ]
}

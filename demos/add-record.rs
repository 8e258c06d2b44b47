// Copyright 2026 The raxdns Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env;

use raxdns::dns::{CloudDns, RecordCreate, RecordType};

#[tokio::main]
async fn main() {
    env_logger::init();
    let mut args = env::args().skip(1);
    let domain_name = args.next().expect("Expected a domain name");
    let record_name = args.next().expect("Expected a record name");
    let address = args.next().expect("Expected an IPv4 address");

    let session = raxdns::Session::from_env()
        .await
        .expect("Failed to create a session from the environment");
    let dns = CloudDns::new(session);

    let domain = dns
        .domains()
        .find_by_name(&domain_name)
        .await
        .expect("Cannot find the domain");
    let records = dns
        .records(&domain)
        .add(vec![RecordCreate::new(RecordType::A, record_name, address)])
        .await
        .expect("Failed to add the record");
    for record in records {
        println!("ID = {}, Name = {}, Data = {}", record.id, record.name, record.data);
    }
}

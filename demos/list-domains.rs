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
use std::str::FromStr;

use futures::pin_mut;
use futures::stream::TryStreamExt;

use raxdns::dns::{CloudDns, DomainQuery};

#[tokio::main]
async fn main() {
    env_logger::init();
    let mut query = DomainQuery::default();
    if let Some(limit) = env::args().nth(1) {
        query = query.with_limit(FromStr::from_str(&limit).expect("Expected a number"));
    }

    let session = raxdns::Session::from_env()
        .await
        .expect("Failed to create a session from the environment");
    let dns = CloudDns::new(session);

    let domains = dns
        .domains()
        .list_all(query)
        .await
        .expect("Failed to start listing domains");
    pin_mut!(domains);
    while let Some(domain) = domains
        .try_next()
        .await
        .expect("Failed to fetch the next chunk")
    {
        println!("ID = {}, Name = {}", domain.id, domain.name);
    }
    println!("Done listing");
}

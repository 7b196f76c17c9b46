pub const LISTING: &str = r#"[
    {
        "tag_name": "6.6.1-liquid-1",
        "draft": false,
        "prerelease": false,
        "published_at": "2024-01-01T00:00:00Z",
        "assets": [
            {
                "name": "linux-upstream-6.6.1_liquid-1-x86_64.pkg.tar.zst",
                "size": 1048576,
                "browser_download_url": "https://example.com/linux-upstream-6.6.1_liquid-1-x86_64.pkg.tar.zst",
                "label": null
            },
            {
                "name": "linux-upstream-6.6.1_liquid-1-x86_64.pkg.tar.zst.sig",
                "size": 566,
                "browser_download_url": "https://example.com/linux-upstream-6.6.1_liquid-1-x86_64.pkg.tar.zst.sig",
                "label": null
            }
        ]
    },
    {
        "tag_name": "draft",
        "draft": true,
        "prerelease": false,
        "published_at": null,
        "assets": [
            {
                "name": "linux-upstream-6.7.0_liquid-1-x86_64.pkg.tar.zst",
                "size": 1048576,
                "browser_download_url": "https://example.com/linux-upstream-6.7.0_liquid-1-x86_64.pkg.tar.zst",
                "label": null
            }
        ]
    }
]"#;

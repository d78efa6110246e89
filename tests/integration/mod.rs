mod fetcher_integration;
